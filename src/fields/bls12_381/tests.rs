use crate::biginteger::{BigInteger, BigInteger256, BigInteger384};
use crate::bytes::{FromBytes, ToBytes};
use crate::fields::bls12_381::{Fq, Fq2, Fr};
use crate::fields::{Field, FpParameters, LegendreSymbol, PrimeField, SquareRootField};
use crate::UniformRand;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

const ITERATIONS: usize = 100;

fn test_rng() -> XorShiftRng {
    XorShiftRng::from_seed([
        0x5d, 0xbe, 0x62, 0x59, 0x8d, 0x31, 0x3d, 0x76, 0x32, 0x37, 0xdb, 0x17, 0xe5, 0xbc, 0x06,
        0x54,
    ])
}

fn field_axioms<F: Field>(rng: &mut XorShiftRng) {
    let zero = F::zero();
    let one = F::one();
    assert!(zero.is_zero());
    assert!(one.is_one());
    assert_eq!(one + &zero, one);

    for _ in 0..ITERATIONS {
        let a = F::rand(rng);
        let b = F::rand(rng);
        let c = F::rand(rng);

        assert_eq!(a + &b, b + &a);
        assert_eq!(a * &b, b * &a);
        assert_eq!((a + &b) + &c, a + &(b + &c));
        assert_eq!((a * &b) * &c, a * &(b * &c));
        assert_eq!(a * &(b + &c), a * &b + &(a * &c));

        assert_eq!(a - &a, zero);
        assert_eq!(a + &(-a), zero);
        assert_eq!(a.double(), a + &a);
        assert_eq!(a.square(), a * &a);

        if !a.is_zero() {
            let a_inv = a.inverse().unwrap();
            assert_eq!(a * &a_inv, one);
            assert_eq!(a / &a, one);
        }
    }
    assert!(zero.inverse().is_none());
}

fn sqrt_consistency<F: SquareRootField>(rng: &mut XorShiftRng) {
    for _ in 0..ITERATIONS {
        let a = F::rand(rng);
        let square = a.square();
        assert!(square.legendre().is_qr() || square.is_zero());
        let root = square.sqrt().unwrap();
        assert!(root == a || root == -a);
    }
}

#[test]
fn fr_field_axioms() {
    let mut rng = test_rng();
    field_axioms::<Fr>(&mut rng);
    sqrt_consistency::<Fr>(&mut rng);
}

#[test]
fn fq_field_axioms() {
    let mut rng = test_rng();
    field_axioms::<Fq>(&mut rng);
    sqrt_consistency::<Fq>(&mut rng);
}

#[test]
fn fq2_field_axioms() {
    let mut rng = test_rng();
    field_axioms::<Fq2>(&mut rng);
    sqrt_consistency::<Fq2>(&mut rng);
}

#[test]
fn fr_two_adic_root_of_unity() {
    // root_of_unity has exact order 2^32
    let root = Fr::root_of_unity();
    let mut pow = root;
    for _ in 0..31 {
        pow.square_in_place();
    }
    assert_ne!(pow, Fr::one());
    assert_eq!(pow, -Fr::one());
    pow.square_in_place();
    assert_eq!(pow, Fr::one());
}

#[test]
fn fq_generator_is_two() {
    assert_eq!(
        Fq::multiplicative_generator(),
        Fq::from_repr(BigInteger384::from(2))
    );
    assert!(Fq::multiplicative_generator().legendre().is_qnr());
    assert!(Fr::multiplicative_generator().legendre().is_qnr());
}

#[test]
fn fermat_little_theorem() {
    let mut rng = test_rng();
    for _ in 0..10 {
        let a = Fq::rand(&mut rng);
        assert_eq!(a.pow(<Fq as PrimeField>::Params::MODULUS), a);
        let b = Fr::rand(&mut rng);
        assert_eq!(b.pow(<Fr as PrimeField>::Params::MODULUS), b);
    }
}

#[test]
fn repr_round_trip() {
    let mut rng = test_rng();
    for _ in 0..ITERATIONS {
        let a = Fq::rand(&mut rng);
        assert_eq!(Fq::from_repr(a.into_repr()), a);
        let b = Fr::rand(&mut rng);
        assert_eq!(Fr::from_repr(b.into_repr()), b);
    }
    // representations at or above the modulus reduce
    let p_plus_one = {
        let mut tmp = <Fr as PrimeField>::Params::MODULUS;
        tmp.add_nocarry(&BigInteger256::from(1));
        tmp
    };
    assert_eq!(Fr::from_repr(p_plus_one), Fr::one());
}

#[test]
fn fq2_frobenius_is_conjugation() {
    let mut rng = test_rng();
    for _ in 0..ITERATIONS {
        let a = Fq2::rand(&mut rng);
        let mut frob = a;
        frob.frobenius_map(1);
        assert_eq!(frob, Fq2::new(a.c0, -a.c1));
        let mut frob2 = frob;
        frob2.frobenius_map(1);
        assert_eq!(frob2, a);
    }
}

#[test]
fn fq2_norm_is_multiplicative() {
    let mut rng = test_rng();
    for _ in 0..ITERATIONS {
        let a = Fq2::rand(&mut rng);
        let b = Fq2::rand(&mut rng);
        assert_eq!((a * &b).norm(), a.norm() * &b.norm());
    }
}

#[test]
fn fq2_quadratic_nonresidue() {
    use crate::fields::bls12_381::Fq2Parameters;
    use crate::fields::Fp2Parameters;
    let qnr = Fq2::new(
        Fq2Parameters::QUADRATIC_NONRESIDUE.0,
        Fq2Parameters::QUADRATIC_NONRESIDUE.1,
    );
    assert_eq!(qnr.legendre(), LegendreSymbol::QuadraticNonResidue);
    assert!(qnr.sqrt().is_none());
}

#[test]
fn fq_minus_one_has_no_sqrt() {
    // q ≡ 3 mod 4, so -1 is a non-residue of Fq but (0, 1) squares to it in Fq2
    let minus_one = -Fq::one();
    assert!(minus_one.sqrt().is_none());
    let root = Fq2::new(minus_one, Fq::zero()).sqrt().unwrap();
    assert_eq!(root.square(), Fq2::new(minus_one, Fq::zero()));
}

#[test]
fn bytes_round_trip() {
    let mut rng = test_rng();
    for _ in 0..ITERATIONS {
        let a = Fq::rand(&mut rng);
        let mut serialized = Vec::new();
        a.write(&mut serialized).unwrap();
        assert_eq!(Fq::read(serialized.as_slice()).unwrap(), a);

        let b = Fq2::rand(&mut rng);
        let mut serialized = Vec::new();
        b.write(&mut serialized).unwrap();
        assert_eq!(Fq2::read(serialized.as_slice()).unwrap(), b);
    }
}
