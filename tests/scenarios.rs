//! End-to-end scenarios across the public API.

use scenecore::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn unit(x: f64, y: f64, z: f64) -> Vector3 {
    Vector3::new(x, y, z).normalized()
}

/// Textbook look-at, written out row by row.
fn reference_look_at(eye: Vector3, target: Vector3, up: Vector3) -> [[f64; 4]; 4] {
    let f = (target - eye).normalized();
    let s = f.cross(&up).normalized();
    let u = s.cross(&f);
    [
        [s.x, s.y, s.z, -s.dot(&eye)],
        [u.x, u.y, u.z, -u.dot(&eye)],
        [-f.x, -f.y, -f.z, f.dot(&eye)],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

#[test]
fn look_at_matches_reference() {
    init_logger();
    let (eye, target, up) = (Vector3::new(2.0, 8.0, 4.0), Vector3::new(-5.0, 6.0, 7.0), Vector3::new(0.0, 1.0, 1.0));
    let m = Matrix4::look_at(&eye, &target, &up);

    let reference = reference_look_at(eye, target, up);
    let mut err = 0.0;
    for (row, values) in reference.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            err += (m.get(row, col) - value).powi(2);
        }
    }
    assert!(err.sqrt() < 1e-9);

    let t = m.transform_point(&target);
    assert!(t.x.abs() < 1e-9 && t.y.abs() < 1e-9 && t.z < 0.0);
    let back = m.transform_direction(&(eye - target));
    assert!(back.x.abs() < 1e-9 && back.y.abs() < 1e-9 && back.z > 0.0);
    assert!(m.row(0).xyz().dot(&up).abs() < 1e-9);
}

#[test]
fn perspective_entries() {
    let m = Matrix4::perspective(60f64.to_radians(), 1.5, 1.0, 100.0);
    assert!((m.get(2, 2) + 101.0 / 99.0).abs() < 1e-12);
    assert_eq!(m.get(3, 2), -1.0);
    assert!((m.get(2, 3) + 200.0 / 99.0).abs() < 1e-12);
}

#[test]
fn ortho_entries() {
    let m = Matrix4::ortho(0.0, 1.0, 2.0, 3.0, 4.0, 5.0);
    assert_eq!((m.get(0, 0), m.get(1, 1), m.get(2, 2)), (2.0, 2.0, -2.0));
    assert!(m.column(3).approx_eq(&Vector4::new(-1.0, -5.0, -9.0, 1.0), 1e-12));
}

#[test]
fn axis_angle_quaternion() {
    let axis = unit(12.0, 13.0, 14.0);
    let q = Quaternion::from_axis_angle(&axis, 33.0);
    let (s, c) = 16.5f64.sin_cos();
    let expected = Quaternion::new(axis.x * s, axis.y * s, axis.z * s, c);
    assert!(q.approx_eq(&expected, 1e-9));
}

#[test]
fn euler_yxz_round_trip() {
    let m = Matrix4::rotate(3.0, &unit(3.0, 2.0, 1.0));
    let angles = EulerAngles::from_matrix4(RotationOrder::YXZ, &m);
    assert!(angles.to_matrix4().approx_eq(&m, 1e-9));
}

#[test]
fn triangulate_unit_square() {
    init_logger();
    let square = Polygon::from_ring(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(1.0, 1.0),
        Vector2::new(0.0, 1.0),
    ]);
    let result = Triangulator::default().triangulate(&square).expect("square triangulates");

    assert_eq!(result.num_triangles(), 2);
    for (i, tri) in result.triangles.iter().enumerate() {
        assert!((result.triangle_area(i) - 0.5).abs() < 1e-12);
        assert!(tri.iter().all(|&v| v < 4));
    }
}

#[test]
fn sample_translation_clip() {
    init_logger();
    let mut model = Model::new("scene");
    model.add_node(model.root(), "mover", Matrix4::IDENTITY);

    let mut clip = Animation::new("move", 1.0, 1.0);
    clip.channel_mut("mover")
        .add_translation(0.0, Vector3::ZERO)
        .add_translation(1.0, Vector3::new(10.0, 0.0, 0.0));

    let mut sampler = AnimationSampler::new();
    sampler.sample(&clip, &model, 0.5);
    let node = sampler.find("mover").expect("node sampled");
    let (t, r, s) = node.mtx_rel_to_parent.decompose();

    assert!(node.animated);
    assert!(t.approx_eq(&Vector3::new(5.0, 0.0, 0.0), 1e-12));
    assert!(r.same_rotation(&Quaternion::IDENTITY, 1e-12));
    assert!(s.approx_eq(&Vector3::ONE, 1e-12));
}

#[test]
fn skinned_box_draw() {
    init_logger();
    let mut mesh = BoxGeometry::cube(1.0).build();
    let bone = mesh.add_bone(Bone::new("mover", Matrix4::IDENTITY));
    for v in 0..mesh.num_verts() as u32 {
        mesh.add_bone_weight(v, BoneWeight::new(bone, 1.0));
    }
    let data = mesh.render_data(&Vector3::ZERO);
    assert!(data.validate().is_ok());
    assert!(data.attribute(Semantic::BoneWeights).is_some());
    assert_eq!(data.indices().len(), 36);

    let mut model = Model::new("rig");
    model.add_node(model.root(), "mover", Matrix4::translate(Vector3::new(0.0, 2.0, 0.0)));
    let mut sampler = AnimationSampler::new();
    sampler.sample(&Animation::new("rest", 0.0, 0.0), &model, 3.0);
    let palette = sampler.bone_palette(&mesh);
    assert!(palette[0].get_position().approx_eq(&Vector3::new(0.0, 2.0, 0.0), 1e-12));
}
