use crate::raster::Shape;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "maxstack_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn raster(shape: Shape, seed: u32) -> Raster {
    let data = (0..shape.sample_count())
        .map(|i| ((i as u32).wrapping_mul(31).wrapping_add(seed * 97) % 256) as u8)
        .collect();
    Raster::from_raw(shape, data).unwrap()
}

fn write(path: &Path, r: &Raster) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    r.save_png(path).unwrap();
}

#[test]
fn max_stack_is_commutative_and_idempotent() {
    let shape = Shape::new(4, 5, 3);
    let a = raster(shape, 1);
    let b = raster(shape, 2);

    let ab = max_stack(&[a.clone(), b.clone()]).unwrap();
    let ba = max_stack(&[b.clone(), a.clone()]).unwrap();
    assert_eq!(ab, ba);

    let aa = max_stack(&[a.clone(), a.clone()]).unwrap();
    assert_eq!(aa, a);
}

#[test]
fn max_stack_takes_per_sample_maximum() {
    let shape = Shape::new(2, 2, 1);
    let a = Raster::from_raw(shape, vec![0, 10, 200, 5]).unwrap();
    let b = Raster::from_raw(shape, vec![1, 9, 100, 255]).unwrap();
    let c = Raster::from_raw(shape, vec![0, 50, 150, 0]).unwrap();

    let out = max_stack(&[a, b, c]).unwrap();
    assert_eq!(out.as_bytes(), &[1, 50, 200, 255]);
}

#[test]
fn max_stack_rejects_mismatch_and_empty() {
    let a = Raster::zeros(Shape::new(10, 10, 3));
    let b = Raster::zeros(Shape::new(10, 12, 3));
    assert!(matches!(
        max_stack(&[a, b]),
        Err(StackError::ShapeMismatch { found, path: None, .. }) if found == Shape::new(10, 12, 3)
    ));
    assert!(matches!(max_stack(&[]), Err(StackError::EmptyGroup)));
}

#[test]
fn output_file_uses_first_base_name() {
    let out = output_file_for(Path::new("root/sub/frame.001.png"), Path::new("out")).unwrap();
    assert_eq!(out, Path::new("out").join("frame.001.png"));
}

#[test]
fn stack_writes_max_of_group() {
    let tmp = temp_dir("stack_writes");
    let shape = Shape::new(3, 3, 4);
    let a = raster(shape, 3);
    let b = raster(shape, 4);
    write(&tmp.join("root").join("x.png"), &a);
    write(&tmp.join("other").join("x.png"), &b);

    let out_dir = tmp.join("out");
    std::fs::create_dir_all(&out_dir).unwrap();
    let written = stack(
        [tmp.join("root").join("x.png"), tmp.join("other").join("x.png")],
        &out_dir,
    )
    .unwrap();

    assert_eq!(written, out_dir.join("x.png"));
    let got = Raster::load(&written).unwrap();
    assert_eq!(got, max_stack(&[a, b]).unwrap());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn single_member_group_is_copied_through() {
    let tmp = temp_dir("stack_single");
    let a = raster(Shape::new(2, 7, 2), 9);
    write(&tmp.join("root").join("solo.png"), &a);

    let out_dir = tmp.join("out");
    std::fs::create_dir_all(&out_dir).unwrap();
    let written = stack([tmp.join("root").join("solo.png")], &out_dir).unwrap();
    assert_eq!(Raster::load(&written).unwrap(), a);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_path_fails_before_decoding() {
    let tmp = temp_dir("stack_missing");
    let first = tmp.join("root").join("x.png");
    // Garbage bytes would fail to decode; the missing check must fire first.
    std::fs::create_dir_all(first.parent().unwrap()).unwrap();
    std::fs::write(&first, b"garbage").unwrap();
    let missing = tmp.join("other").join("x.png");

    let out_dir = tmp.join("out");
    std::fs::create_dir_all(&out_dir).unwrap();
    let err = stack([first, missing.clone()], &out_dir).unwrap_err();
    assert!(matches!(err, StackError::MissingFile { ref path } if *path == missing));
    assert!(!out_dir.join("x.png").exists());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn shape_mismatch_writes_nothing() {
    let tmp = temp_dir("stack_mismatch");
    let a = tmp.join("root").join("x.png");
    let b = tmp.join("other").join("x.png");
    write(&a, &Raster::zeros(Shape::new(10, 10, 3)));
    write(&b, &Raster::zeros(Shape::new(10, 12, 3)));

    let out_dir = tmp.join("out");
    std::fs::create_dir_all(&out_dir).unwrap();
    let err = stack([a, b.clone()], &out_dir).unwrap_err();
    match err {
        StackError::ShapeMismatch {
            expected,
            found,
            path,
        } => {
            assert_eq!(expected, Shape::new(10, 10, 3));
            assert_eq!(found, Shape::new(10, 12, 3));
            assert_eq!(path, Some(b));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!out_dir.join("x.png").exists());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn channel_count_mismatch_is_a_shape_mismatch() {
    let tmp = temp_dir("stack_channels");
    let a = tmp.join("root").join("x.png");
    let b = tmp.join("other").join("x.png");
    write(&a, &Raster::zeros(Shape::new(4, 4, 3)));
    write(&b, &Raster::zeros(Shape::new(4, 4, 4)));

    let out_dir = tmp.join("out");
    std::fs::create_dir_all(&out_dir).unwrap();
    assert!(matches!(
        stack([a, b], &out_dir),
        Err(StackError::ShapeMismatch { .. })
    ));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn empty_group_is_an_error() {
    let paths: Vec<PathBuf> = Vec::new();
    assert!(matches!(
        stack(paths, Path::new("unused")),
        Err(StackError::EmptyGroup)
    ));
}
