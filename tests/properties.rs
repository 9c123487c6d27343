//! Quantified invariants checked over seeded random inputs.

use scenecore::prelude::*;
use std::f64::consts::{PI, TAU};

const SAMPLES: usize = 200;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_matrix4(rng: &mut Random) -> Matrix4 {
    let mut elements = [0.0; 16];
    for e in &mut elements {
        *e = rng.get_range(-10.0, 10.0);
    }
    Matrix4::from_cols_array(elements)
}

fn frobenius(m: &Matrix4) -> f64 {
    let mut sum = 0.0;
    for row in 0..4 {
        for col in 0..4 {
            sum += m.get(row, col).powi(2);
        }
    }
    sum.sqrt()
}

#[test]
fn identity_is_neutral() {
    let mut rng = Random::new(1);
    for _ in 0..SAMPLES {
        let m2 = Matrix2::new(rng.get_range(-5.0, 5.0), rng.get_range(-5.0, 5.0), rng.get_range(-5.0, 5.0), rng.get_range(-5.0, 5.0));
        assert_eq!(m2 * Matrix2::IDENTITY, m2);
        assert_eq!(Matrix2::IDENTITY * m2, m2);

        let m3 = Matrix3::rotate(rng.get_range(-PI, PI), &rng.get_direction()) * Matrix3::scale(Vector3::splat(rng.get_range(0.1, 4.0)));
        assert_eq!(m3 * Matrix3::IDENTITY, m3);
        assert_eq!(Matrix3::IDENTITY * m3, m3);

        let m4 = random_matrix4(&mut rng);
        assert_eq!(m4 * Matrix4::IDENTITY, m4);
        assert_eq!(Matrix4::IDENTITY * m4, m4);
    }
}

#[test]
fn multiplication_is_associative() {
    let mut rng = Random::new(2);
    for _ in 0..SAMPLES {
        let (a, b, c) = (random_matrix4(&mut rng), random_matrix4(&mut rng), random_matrix4(&mut rng));
        let left = (a * b) * c;
        let right = a * (b * c);
        // relative to the magnitude of the product
        let scale = frobenius(&left).max(1.0);
        assert!(left.distance_to(&right) / scale < 1e-9);
    }
}

#[test]
fn inverse_times_matrix_is_identity() {
    let mut rng = Random::new(3);
    let mut checked = 0;
    for _ in 0..SAMPLES {
        let m = Matrix4::compose(
            &Vector3::new(rng.get_range(-50.0, 50.0), rng.get_range(-50.0, 50.0), rng.get_range(-50.0, 50.0)),
            &Quaternion::from_axis_angle(&rng.get_direction(), rng.get_range(-PI, PI)),
            &Vector3::new(rng.get_range(0.2, 3.0), rng.get_range(0.2, 3.0), rng.get_range(0.2, 3.0)),
        );
        if m.determinant().abs() > 1e-12 {
            assert!((m.inverted() * m).approx_eq(&Matrix4::IDENTITY, 1e-9));
            checked += 1;
        }
    }
    assert_eq!(checked, SAMPLES);
    assert_eq!(Matrix4::ZERO.inverted(), Matrix4::ZERO);
}

#[test]
fn normalized_quaternion_has_unit_length() {
    let mut rng = Random::new(4);
    for _ in 0..SAMPLES {
        let q = Quaternion::new(
            rng.get_range(-100.0, 100.0),
            rng.get_range(-100.0, 100.0),
            rng.get_range(-100.0, 100.0),
            rng.get_range(-100.0, 100.0),
        );
        if q.length() > 0.0 {
            assert!((q.normalized().length() - 1.0).abs() <= 1e-12);
        }
    }
}

#[test]
fn full_turn_is_identity() {
    let mut rng = Random::new(5);
    for _ in 0..SAMPLES {
        let q = Quaternion::from_axis_angle(&rng.get_direction(), TAU);
        assert!(q.same_rotation(&Quaternion::IDENTITY, 1e-9));
        assert!(q.to_matrix3().approx_eq(&Matrix3::IDENTITY, 1e-9));
    }
}

#[test]
fn quaternion_matrix_agrees_with_rotate() {
    let mut rng = Random::new(6);
    for _ in 0..SAMPLES {
        let axis = rng.get_direction();
        let angle = rng.get_range(-TAU, TAU);
        let v = rng.get_direction() * rng.get_range(0.0, 20.0);
        let by_quaternion = Quaternion::from_axis_angle(&axis, angle).to_matrix3() * v;
        let by_matrix = Matrix3::rotate(angle, &axis) * v;
        assert!(by_quaternion.approx_eq(&by_matrix, 1e-9));
    }
}

#[test]
fn euler_round_trip_every_order() {
    let mut rng = Random::new(7);
    for order in RotationOrder::ALL {
        let mut checked = 0;
        for _ in 0..SAMPLES {
            let m = Matrix3::rotate(rng.get_range(-PI, PI), &rng.get_direction());
            let angles = EulerAngles::from_matrix3(order, &m);
            // stay away from the gimbal-lock plane
            let away = if order.is_proper_euler() {
                angles.pitch.sin().abs() > 0.05
            } else {
                angles.pitch.cos().abs() > 0.05
            };
            if away {
                assert!(angles.to_matrix3().approx_eq(&m, 1e-9), "{:?} {:?}", order, angles);
                checked += 1;
            }
        }
        assert!(checked > SAMPLES / 2);
    }
}

#[test]
fn frustum_contains_its_corners() {
    let (v_fov, aspect, near, far) = (1.0, 1.5, 1.0, 50.0);
    let frustum = Frustum::from_matrix(&Matrix4::perspective(v_fov, aspect, near, far));

    let half_tan = (v_fov * 0.5).tan();
    for depth in [near, far] {
        let (h, w) = (depth * half_tan, depth * half_tan * aspect);
        for (x, y) in [(-w, -h), (w, -h), (w, h), (-w, h)] {
            assert_eq!(frustum.touches_point(&Vector3::new(x, y, -depth)), Touch::Inside);
        }
    }
    assert_eq!(frustum.touches_point(&Vector3::new(0.0, 0.0, -2.0 * far)), Touch::Outside);
}

#[test]
fn merge_offsets_indices() {
    let mut a = SphereGeometry::new(1.0, 6, 4).build();
    let mut b = BoxGeometry::cube(1.0).build();
    a.triangulate_quads();
    b.triangulate_quads();
    b.translate(&Vector3::new(5.0, 0.0, 0.0));

    let (na, nb) = (a.num_verts(), b.num_verts());
    let ta = a.triangles.len();
    let mut merged = a.clone();
    merged.merge(&b);

    assert_eq!(merged.num_verts(), na + nb);
    for (i, tri) in b.triangles.iter().enumerate() {
        let m = merged.triangles[ta + i];
        for k in 0..3 {
            assert_eq!(m[k], tri[k] + na as u32);
            assert_eq!(merged.positions[m[k] as usize], b.positions[tri[k] as usize]);
        }
    }
    assert!(merged.validate().is_ok());
}

#[test]
fn recalculated_normals_point_outward() {
    let meshes = [
        BoxGeometry::new(2.0, 3.0, 1.0).build(),
        SphereGeometry::new(2.0, 16, 8).build(),
        CylinderGeometry::new(1.0, 1.0, 2.0).with_segments(16, 2).build(),
        ConeGeometry::new(1.0, 2.0, true, 16).build(),
    ];
    for mut mesh in meshes {
        let center = mesh.bounds().center();
        mesh.recalculate_vertex_normals();
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!((n.length() - 1.0).abs() < 1e-9, "{}: normal {:?}", mesh.name, n);
            assert!(n.dot(&(*p - center)) > 0.0, "{}: inward normal at {:?}", mesh.name, p);
        }
    }
}

#[test]
fn box_wireframe_has_twelve_edges() {
    let mut mesh = BoxGeometry::new(1.0, 2.0, 3.0).build();
    mesh.convert_faces_to_wireframe_lines();
    assert_eq!(mesh.lines.len(), 12);
    assert_eq!(mesh.num_faces(), 0);
}

#[test]
fn triangulated_polygons_cover_their_area() {
    init_logger();
    let mut rng = Random::new(8);
    let triangulator = Triangulator::default();
    for _ in 0..50 {
        // star-shaped around the origin, hence simple
        let n = 5 + (rng.get_int() % 26) as usize;
        let ring: Vec<Vector2> = (0..n)
            .map(|i| {
                let angle = TAU * (i as f64 + rng.get_range(0.1, 0.9)) / n as f64;
                let radius = rng.get_range(0.5, 3.0);
                Vector2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        let polygon = Polygon::from_ring(ring);

        let result = triangulator.triangulate(&polygon).expect("simple polygon triangulates");
        assert_eq!(result.num_triangles(), n - 2);
        assert!(result.triangles.iter().flatten().all(|&v| (v as usize) < n));
        assert!((result.area() - polygon.area()).abs() < 1e-9);
    }
}

#[test]
fn identity_first_keys_sample_to_identity() {
    init_logger();
    let mut model = Model::new("rig");
    let spine = model.add_node(model.root(), "spine", Matrix4::IDENTITY);
    let arm = model.add_node(spine, "arm", Matrix4::IDENTITY);
    model.add_node(arm, "hand", Matrix4::IDENTITY);

    let mut clip = Animation::new("wave", 10.0, 30.0);
    for name in ["rig", "spine", "arm", "hand"] {
        clip.channel_mut(name)
            .add_translation(0.0, Vector3::ZERO)
            .add_translation(10.0, Vector3::new(1.0, 2.0, 3.0))
            .add_rotation(0.0, Quaternion::IDENTITY)
            .add_rotation(10.0, Quaternion::from_axis_angle(&Vector3::UNIT_Z, 1.0))
            .add_scale(0.0, Vector3::ONE)
            .add_scale(10.0, Vector3::splat(2.0));
    }

    let mut sampler = AnimationSampler::new();
    let transforms = sampler.sample(&clip, &model, 0.0);
    assert_eq!(transforms.len(), 4);
    for t in transforms {
        assert!(t.animated);
        assert!(t.mtx_rel_to_parent.approx_eq(&Matrix4::IDENTITY, 1e-12));
        assert!(t.mtx_rel_to_model.approx_eq(&Matrix4::IDENTITY, 1e-12));
    }
}
