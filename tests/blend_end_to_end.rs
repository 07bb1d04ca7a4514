use pyrblend::{reconstruct, Domain, Layer, Mask, PixelBuffer, Pyramid, PyrBlendError};

fn gradient_image(width: usize, height: usize, flip: bool) -> PixelBuffer {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let x = if flip { width - 1 - x } else { x };
            data.push((x * 255 / (width - 1).max(1)) as i16);
            data.push((y * 255 / (height - 1).max(1)) as i16);
            data.push(128);
        }
    }
    PixelBuffer::from_vec(data, width, height, Domain::Magnitude).unwrap()
}

fn pyramid_at_depth(image: PixelBuffer, depth: usize) -> Pyramid {
    let mut pyramid = Pyramid::new(image).unwrap();
    pyramid.set_depth(depth).unwrap();
    pyramid
}

fn collect_layers(pyramid: &Pyramid) -> Vec<Layer> {
    (0..pyramid.depth())
        .map(|i| pyramid.layer(i).unwrap())
        .collect()
}

#[test]
fn all_ones_mask_reproduces_the_first_pyramid() {
    let a = pyramid_at_depth(gradient_image(64, 64, false), 3);
    let b = pyramid_at_depth(gradient_image(64, 64, true), 3);
    let mask = Mask::filled(64, 64, 1.0).unwrap();

    let combined = Pyramid::combine(&a, &b, &mask).unwrap();
    let expected = reconstruct(&collect_layers(&a)).unwrap();
    assert_eq!(combined.resized_image(), expected);
    assert_eq!(combined.source_image(), expected);
}

#[test]
fn all_zeros_mask_reproduces_the_second_pyramid() {
    let a = pyramid_at_depth(gradient_image(64, 64, false), 3);
    let b = pyramid_at_depth(gradient_image(64, 64, true), 3);
    let mask = Mask::filled(64, 64, 0.0).unwrap();

    let combined = Pyramid::combine(&a, &b, &mask).unwrap();
    let expected = reconstruct(&collect_layers(&b)).unwrap();
    assert_eq!(combined.resized_image(), expected);
}

#[test]
fn seam_takes_left_from_a_and_right_from_b() {
    // Constant images make the provenance of every output pixel obvious.
    let a = pyramid_at_depth(
        PixelBuffer::filled(256, 64, 200, Domain::Magnitude).unwrap(),
        3,
    );
    let b = pyramid_at_depth(
        PixelBuffer::filled(256, 64, 40, Domain::Magnitude).unwrap(),
        3,
    );
    // Band over columns 64..96.
    let mask = Mask::horizontal_ramp(256, 64, 0.25, 0.375).unwrap();

    let combined = Pyramid::combine(&a, &b, &mask).unwrap();
    let image = combined.resized_image();

    // Coarse-level blending widens the seam's influence by a few pixels per
    // level, so probe well clear of the band.
    for y in 0..64 {
        for x in 0..48 {
            assert_eq!(image.get(x, y), Some([200, 200, 200]), "at ({x}, {y})");
        }
        for x in 112..256 {
            assert_eq!(image.get(x, y), Some([40, 40, 40]), "at ({x}, {y})");
        }
        for x in 48..112 {
            let px = image.get(x, y).unwrap();
            assert!(px.iter().all(|&v| (40..=200).contains(&v)), "at ({x}, {y})");
        }
    }
}

#[test]
fn combined_pyramid_is_a_regular_pyramid() {
    let a = pyramid_at_depth(gradient_image(64, 64, false), 2);
    let b = pyramid_at_depth(gradient_image(64, 64, true), 2);
    let mask = Mask::horizontal_ramp(64, 64, 0.4, 0.6).unwrap();

    let mut combined = Pyramid::combine(&a, &b, &mask).unwrap();
    assert_eq!(combined.depth(), 2);
    assert_eq!(combined.working_size(), (64, 64));
    assert_eq!(combined.layer(0).unwrap().domain(), Domain::Difference);
    assert_eq!(combined.layer(1).unwrap().domain(), Domain::Magnitude);

    // The result supports the same depth operations as any other pyramid.
    combined.set_depth(1).unwrap();
    assert_eq!(combined.depth(), 1);
    combined.set_depth(3).unwrap();
    assert_eq!(combined.depth(), 3);
}

#[test]
fn depth_mismatch_is_rejected_without_mutation() {
    let a = pyramid_at_depth(gradient_image(128, 128, false), 3);
    let b = pyramid_at_depth(gradient_image(128, 128, true), 4);
    let mask = Mask::filled(128, 128, 0.5).unwrap();

    assert_eq!(
        Pyramid::combine(&a, &b, &mask).unwrap_err(),
        PyrBlendError::DepthMismatch { left: 3, right: 4 }
    );
    assert_eq!(
        Pyramid::combine(&b, &a, &mask).unwrap_err(),
        PyrBlendError::DepthMismatch { left: 4, right: 3 }
    );
    assert_eq!(a.depth(), 3);
    assert_eq!(b.depth(), 4);
}

#[test]
fn working_size_mismatch_is_rejected() {
    let a = pyramid_at_depth(gradient_image(64, 64, false), 2);
    let b = pyramid_at_depth(gradient_image(128, 64, true), 2);
    let mask = Mask::filled(64, 64, 0.5).unwrap();

    assert_eq!(
        Pyramid::combine(&a, &b, &mask).unwrap_err(),
        PyrBlendError::DimensionMismatch {
            expected_width: 64,
            expected_height: 64,
            width: 128,
            height: 64,
        }
    );
}

#[test]
fn mask_resolution_mismatch_is_rejected() {
    let a = pyramid_at_depth(gradient_image(64, 64, false), 2);
    let b = pyramid_at_depth(gradient_image(64, 64, true), 2);
    let mask = Mask::filled(32, 32, 0.5).unwrap();

    assert_eq!(
        Pyramid::combine(&a, &b, &mask).unwrap_err(),
        PyrBlendError::DimensionMismatch {
            expected_width: 64,
            expected_height: 64,
            width: 32,
            height: 32,
        }
    );
}

#[test]
fn seam_blend_of_gradients_stays_smooth() {
    let a = pyramid_at_depth(gradient_image(64, 64, false), 3);
    let b = pyramid_at_depth(gradient_image(64, 64, true), 3);
    let mask = Mask::horizontal_ramp(64, 64, 0.3, 0.7).unwrap();

    let combined = Pyramid::combine(&a, &b, &mask).unwrap();
    let image = combined.resized_image();

    // Neighboring pixels along a row never jump by more than the sources'
    // own gradient plus a little blending slack; a visible seam would show
    // up as a large step.
    for y in 0..64 {
        for x in 1..64 {
            let prev = image.get(x - 1, y).unwrap();
            let curr = image.get(x, y).unwrap();
            for c in 0..3 {
                assert!(
                    (curr[c] - prev[c]).abs() <= 24,
                    "step at ({x}, {y}) channel {c}"
                );
            }
        }
    }
}
