use libtensor_core::{ErrorKind, Parallelism, Shape, Tensor};

macro_rules! test_for_dtype {
    ($dt:ty, $name:ident) => {
        mod $name {
            use super::*;

            const V: $dt = 3 as $dt;
            const W: $dt = 2 as $dt;

            #[test]
            fn initialize() {
                let t1 = Tensor::<$dt, 1>::from_shape([3]);
                let t2 = Tensor::<$dt, 2>::from_shape([2, 2]);
                let t3 = Tensor::<$dt, 3>::from_shape([1, 2, 2]);
                let t4 = Tensor::<$dt, 3>::from_shape([1, 3, 2]);

                assert_eq!(t1.shape(), &[3]);
                assert_eq!(t2.shape(), &[2, 2]);
                assert_eq!(t3.shape(), &[1, 2, 2]);
                assert_eq!(t4.shape(), &[1, 3, 2]);
                assert_eq!(t4[0].shape(), &[3, 2]);
                assert_eq!(t4[0][2].shape(), &[2]);
            }

            #[test]
            fn like() {
                let t3 = Tensor::<$dt, 3>::from_shape([1, 3, 2]);
                let l3 = Tensor::like(&t3);
                assert_eq!(l3.shape(), t3.shape());
                assert_eq!(l3, t3);
            }

            #[test]
            fn fill() {
                let mut t1 = Tensor::<$dt, 1>::from_shape([3]);
                let mut t2 = Tensor::<$dt, 2>::from_shape([2, 2]);
                let mut t3 = Tensor::<$dt, 3>::from_shape([1, 2, 2]);
                let mut e1 = Tensor::like(&t1);
                let mut e2 = Tensor::like(&t2);
                let mut e3 = Tensor::like(&t3);
                t1.fill(V);
                t2.fill(V);
                t3.fill(V);

                assert_ne!(t1, e1);
                assert_ne!(t2, e2);
                assert_ne!(t3, e3);

                e1[0] = V;
                e1[1] = V;
                e1[2] = V;

                e2[0][0] = V;
                e2[0][1] = V;
                e2[1][0] = V;
                e2[1][1] = V;

                e3[0][0][0] = V;
                e3[0][0][1] = V;
                e3[0][1][0] = V;
                e3[0][1][1] = V;

                assert_eq!(t1, e1);
                assert_eq!(t2, e2);
                assert_eq!(t3, e3);
                assert_eq!(t3, Tensor::full([1, 2, 2], V));
            }

            #[test]
            fn map() {
                let mut t = Tensor::<$dt, 2>::from_shape([2, 2]);
                let a = Tensor::full([2, 2], V);
                let b = Tensor::full([2, 2], W);

                t.map(|r: &mut $dt, a: &$dt| *r = *a, [&a]);
                assert_eq!(t, a);

                t.map(|r: &mut $dt, a: &$dt, b: &$dt| *r = *a + *b, [&a, &b]);
                assert_eq!(t, Tensor::full([2, 2], V + W));
            }

            #[test]
            fn map_safe() {
                let mut t = Tensor::<$dt, 2>::full([2, 2], W);
                let a = Tensor::full([2, 2], V);
                let invalid = Tensor::<$dt, 2>::from_shape([1, 1]);

                t.map_safe(|r: &mut $dt, a: &$dt| *r = *a, [&a]).unwrap();
                assert_eq!(t, a);

                let err = t
                    .map_safe(|r: &mut $dt, a: &$dt, b: &$dt| *r = *a * *b, [&a, &invalid])
                    .unwrap_err();
                assert_eq!(err.kind(), ErrorKind::InvalidArgument);
                assert_eq!(t, a);
            }
        }
    };
}

test_for_dtype!(f32, f32_tests);
test_for_dtype!(f64, f64_tests);
test_for_dtype!(i32, i32_tests);
test_for_dtype!(u8, u8_tests);

type Tensor1D = Tensor<f64, 1>;
type Tensor2D = Tensor<f64, 2>;
type Tensor3D = Tensor<f64, 3>;

#[test]
fn assign_subtensor() {
    let t2 = Tensor2D::full([2, 2], 1.5);
    let mut t3 = Tensor3D::from_shape([1, 2, 2]);
    let mut t4 = Tensor3D::from_shape([1, 3, 2]);

    t3.at_mut(0).unwrap().assign(&t2).unwrap();
    assert_eq!(t3[0], t2);

    let err = t4[0].assign(&t2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(t4, Tensor3D::from_shape([1, 3, 2]));
}

#[test]
fn checked_access() {
    let mut t = Tensor2D::from_shape([2, 3]);
    assert!(t.at(1).is_ok());
    assert_eq!(t.at(2).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(t.at(1).unwrap().at(3).unwrap_err().kind(), ErrorKind::OutOfRange);

    *t.at_mut(1).unwrap().at_mut(2).unwrap() = 4.0;
    assert_eq!(t[1][2], 4.0);
}

#[test]
fn map_safe_inner_mismatch() {
    let mut t = Tensor2D::zeros([2, 3]);
    let mut b = Tensor2D::full([2, 3], 7.0);
    b[1].resize([1]);
    assert_eq!(b.shape(), t.shape());

    let err = t.map_safe(|r: &mut f64, a: &f64| *r = *a, [&b]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn map_reads_longer_secondary_as_prefix() {
    let mut t = Tensor2D::zeros([2, 2]);
    let mut b = Tensor2D::from_shape([3, 4]);
    for (i, row) in b.iter_mut().enumerate() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = (10 * i + j) as f64;
        }
    }
    t.map(|r: &mut f64, a: &f64| *r = *a, [&b]);
    assert_eq!(t[0][1], 1.0);
    assert_eq!(t[1][0], 10.0);
    assert_eq!(t[1][1], 11.0);
}

#[test]
#[should_panic]
fn map_panics_on_shorter_secondary() {
    let mut t = Tensor2D::zeros([3, 3]);
    let b = Tensor2D::ones([3, 2]);
    t.map(|r: &mut f64, a: &f64| *r = *a, [&b]);
}

#[test]
fn resize() {
    let mut t = Tensor2D::full([2, 2], 1.0);
    let before = t.clone();
    t.resize([2, 2]);
    assert_eq!(t, before);

    t.resize([3, 4]);
    assert_eq!(t.shape(), &[3, 4]);
    assert_eq!(t.len(), 3);
    assert!(t.iter().all(|row| row.shape() == &[4]));
    assert_eq!(t[0][0], 1.0);
    assert_eq!(t[2][3], 0.0);

    t.resize([0, 4]);
    assert!(t.is_empty());
}

#[test]
fn default_and_empty() {
    let t = Tensor3D::default();
    assert_eq!(t.shape(), &Shape::default());
    assert!(t.is_empty());
    assert_eq!(t.rank(), 3);

    let mut e = Tensor2D::from_shape([0, 5]);
    e.fill(2.0);
    assert_eq!(e, Tensor2D::from_shape([0, 5]));
    assert_ne!(e, Tensor2D::from_shape([0, 4]));
}

#[test]
fn clone_is_deep() {
    let a = Tensor2D::full([2, 2], 1.0);
    let mut b = a.clone();
    b[1][1] = 7.0;
    assert_eq!(a[1][1], 1.0);
    assert_ne!(a, b);
}

#[test]
fn constructors() {
    let s = Shape::new([2, 3, 4]);
    assert_eq!(Tensor3D::zeros(s), Tensor3D::from_shape(s));
    assert_eq!(Tensor3D::ones(s), Tensor3D::full(s, 1.0));
    assert_eq!(Tensor3D::ones(s).zeros_like(), Tensor3D::zeros(s));
    assert_eq!(s.numel(), 24);
}

#[test]
fn iterate_rows() {
    let mut t = Tensor2D::from_shape([3, 2]);
    for (i, row) in t.iter_mut().enumerate() {
        row.fill(i as f64);
    }
    let sums: Vec<f64> = t.iter().map(|row| row[0] + row[1]).collect();
    assert_eq!(sums, vec![0.0, 2.0, 4.0]);
}

#[test]
fn display() {
    let mut t = Tensor1D::from_shape([3]);
    t[0] = 1.0;
    t[1] = 2.5;
    assert_eq!(t.to_string(), "{1 2.5 0}");

    let t = Tensor::<i32, 2>::full([2, 2], 4);
    assert_eq!(t.to_string(), "{{4 4}\n{4 4}}");
}

#[test]
fn map_in_dedicated_pool() {
    let a = Tensor3D::full([4, 8, 8], 2.0);
    let mut out = Tensor3D::like(&a);
    Parallelism::Rayon(2)
        .install(|| {
            out.map(|r: &mut f64, a: &f64| *r = a * a, [&a]);
        })
        .unwrap();
    assert_eq!(out, Tensor3D::full([4, 8, 8], 4.0));
}
