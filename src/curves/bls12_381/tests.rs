use crate::biginteger::{BigInteger256, BigInteger384};
use crate::curves::bls12_381::{g2, G1Affine, G1Projective, G2Affine, G2Projective};
use crate::curves::models::short_weierstrass_jacobian::{
    GroupAffine, GroupExtended, GroupProjective,
};
use crate::curves::models::SWModelParameters;
use crate::error::SerializationError;
use crate::fields::bls12_381::{Fq, Fr};
use crate::fields::{Field, FpParameters, PrimeField};
use crate::serialize::{Decoder, EncodableField, Encoder};
use crate::UniformRand;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

const ITERATIONS: usize = 20;

fn test_rng() -> XorShiftRng {
    XorShiftRng::from_seed([
        0x21, 0xa3, 0x47, 0x99, 0x3e, 0x16, 0x8d, 0xc5, 0x50, 0xe8, 0x0b, 0x2f, 0x77, 0xc1, 0x4b,
        0x62,
    ])
}

fn from_hex(s: &str) -> Vec<u8> {
    assert!(s.len() % 2 == 0);
    (0..s.len() / 2)
        .map(|i| u8::from_str_radix(&s[2 * i..2 * i + 2], 16).unwrap())
        .collect()
}

fn group_laws<P: SWModelParameters>(rng: &mut XorShiftRng) {
    let zero = GroupProjective::<P>::zero();
    for _ in 0..ITERATIONS {
        let a = GroupProjective::<P>::rand(rng);
        let b = GroupProjective::<P>::rand(rng);
        let c = GroupProjective::<P>::rand(rng);

        // commutativity and associativity
        assert_eq!(a + &b, b + &a);
        assert_eq!((a + &b) + &c, a + &(b + &c));

        // identity and inverses
        assert_eq!(a + &zero, a);
        assert!((a + &(-a)).is_zero());

        // doubling agrees with addition of equal operands
        let mut twice = a;
        twice.add_assign(&a);
        assert_eq!(twice, a.double());

        // mixed addition agrees with projective addition
        let mut mixed = a;
        mixed.add_assign_mixed(&b.into_affine());
        assert_eq!(mixed, a + &b);

        // subtraction
        let mut diff = a;
        diff.sub_assign(&b);
        assert_eq!(diff + &b, a);

        assert!(a.is_on_curve());
        assert!(a.into_affine().is_on_curve());
        assert!(a.into_affine().is_in_subgroup());
    }
}

#[test]
fn g1_group_laws() {
    group_laws::<crate::curves::bls12_381::g1::Bls12_381G1Parameters>(&mut test_rng());
}

#[test]
fn g2_group_laws() {
    group_laws::<g2::Bls12_381G2Parameters>(&mut test_rng());
}

fn scalar_homomorphism<P: SWModelParameters<ScalarField = Fr>>(rng: &mut XorShiftRng) {
    for _ in 0..ITERATIONS {
        let g = GroupProjective::<P>::rand(rng);
        let s = Fr::rand(rng);
        let t = Fr::rand(rng);

        let lhs = g.mul(&(s + &t).into_repr());
        let rhs = g.mul(&s.into_repr()) + &g.mul(&t.into_repr());
        assert_eq!(lhs, rhs);

        let lhs = g.mul(&s.into_repr()).mul(&t.into_repr());
        let rhs = g.mul(&(s * &t).into_repr());
        assert_eq!(lhs, rhs);
    }

    // the subgroup order annihilates
    let g = GroupProjective::<P>::rand(rng);
    assert!(g.mul_windowed(&<Fr as PrimeField>::Params::MODULUS).is_zero());
    assert!(g.mul(&Fr::zero().into_repr()).is_zero());
    assert_eq!(g.mul(&Fr::one().into_repr()), g);
}

#[test]
fn g1_scalar_homomorphism() {
    scalar_homomorphism::<crate::curves::bls12_381::g1::Bls12_381G1Parameters>(&mut test_rng());
}

#[test]
fn g2_scalar_homomorphism() {
    scalar_homomorphism::<g2::Bls12_381G2Parameters>(&mut test_rng());
}

fn glv_matches_windowed<P: SWModelParameters<ScalarField = Fr>>(rng: &mut XorShiftRng) {
    let lambda = {
        let l = P::LAMBDA;
        BigInteger256([l[0], l[1], 0, 0])
    };

    for _ in 0..ITERATIONS {
        let g = GroupProjective::<P>::rand(rng);

        // the endomorphism is multiplication by the eigenvalue
        assert_eq!(g.phi(), g.mul_windowed(&lambda));

        let s = Fr::rand(rng).into_repr();
        assert_eq!(g.mul_glv(&s), g.mul_windowed(&s));
    }

    // boundary scalars
    let g = GroupProjective::<P>::rand(rng);
    for s in [
        Fr::zero().into_repr(),
        Fr::one().into_repr(),
        (-Fr::one()).into_repr(),
        lambda,
    ] {
        assert_eq!(g.mul_glv(&s), g.mul_windowed(&s), "scalar {}", s);
    }
}

#[test]
fn g1_glv_matches_windowed() {
    glv_matches_windowed::<crate::curves::bls12_381::g1::Bls12_381G1Parameters>(&mut test_rng());
}

#[test]
fn g2_glv_matches_windowed() {
    glv_matches_windowed::<g2::Bls12_381G2Parameters>(&mut test_rng());
}

#[test]
fn generator_table_multiplication() {
    let mut rng = test_rng();
    for _ in 0..5 {
        let s = Fr::rand(&mut rng).into_repr();
        assert_eq!(
            G1Projective::mul_by_gen(&s),
            G1Projective::prime_subgroup_generator().mul_windowed(&s)
        );
        assert_eq!(
            G2Projective::mul_by_gen(&s),
            G2Projective::prime_subgroup_generator().mul_windowed(&s)
        );
    }
    assert!(G1Projective::mul_by_gen(&Fr::zero().into_repr()).is_zero());
}

#[test]
fn scalar_mul_boundary_scalars() {
    let gen = G1Projective::prime_subgroup_generator();
    assert!(gen.mul(&Fr::zero().into_repr()).is_zero());
    assert_eq!(gen.mul(&Fr::one().into_repr()), gen);
    assert_eq!(gen.mul(&(-Fr::one()).into_repr()), -gen);
}

#[test]
fn add_negated_point_is_infinity() {
    // the formulas must degenerate to Z = 0 on P + (-P) without an explicit
    // branch
    let mut rng = test_rng();
    let p = G1Projective::rand(&mut rng);

    let mut jac = p;
    jac.add_assign(&(-p));
    assert!(jac.is_zero());

    let mut mixed = p;
    mixed.add_assign_mixed(&(-p.into_affine()));
    assert!(mixed.is_zero());

    let mut ext = GroupExtended::zero();
    ext.add_assign_mixed(&p.into_affine());
    ext.add_assign_mixed(&(-p.into_affine()));
    assert!(ext.is_zero());
    assert!(ext.to_jacobian().is_zero());
}

#[test]
fn extended_coordinates_match_jacobian() {
    let mut rng = test_rng();
    let points: Vec<G2Affine> = (0..10).map(|_| G2Affine::rand(&mut rng)).collect();

    let mut ext = GroupExtended::zero();
    let mut jac = G2Projective::zero();
    for p in &points {
        ext.add_assign_mixed(p);
        jac.add_assign_mixed(p);
    }
    assert_eq!(ext.to_jacobian(), jac);

    // doubling fall-through: adding the same affine point twice
    let mut ext = GroupExtended::zero();
    ext.add_assign_mixed(&points[0]);
    ext.add_assign_mixed(&points[0]);
    assert_eq!(ext.to_jacobian(), points[0].into_projective().double());
}

#[test]
fn batch_jacobian_to_affine_matches_single() {
    let mut rng = test_rng();
    let mut points: Vec<G1Projective> = (0..33).map(|_| G1Projective::rand(&mut rng)).collect();
    // sprinkle identities, including the edges
    points[0] = G1Projective::zero();
    points[13] = G1Projective::zero();
    points[32] = G1Projective::zero();

    let mut affine = vec![G1Affine::zero(); points.len()];
    G1Projective::batch_jacobian_to_affine(&points, &mut affine);
    for (p, a) in points.iter().zip(affine.iter()) {
        assert_eq!(p.into_affine(), *a);
    }

    // all-identity input exercises the empty product
    let ids = vec![G1Projective::zero(); 4];
    let mut out = vec![G1Affine::zero(); 4];
    G1Projective::batch_jacobian_to_affine(&ids, &mut out);
    assert!(out.iter().all(|p| p.is_zero()));
}

#[test]
fn affine_jacobian_round_trip() {
    let mut rng = test_rng();
    for _ in 0..ITERATIONS {
        let p = G1Projective::rand(&mut rng);
        assert_eq!(p.into_affine().into_projective(), p);
        let q = G2Projective::rand(&mut rng);
        assert_eq!(q.into_affine().into_projective(), q);
    }
    assert!(G1Projective::zero().into_affine().is_zero());
    assert!(G1Affine::zero().into_projective().is_zero());
}

#[test]
fn bytes_round_trips() {
    let mut rng = test_rng();
    for _ in 0..ITERATIONS {
        let p = G1Affine::rand(&mut rng);
        let compressed = p.bytes();
        assert_eq!(compressed.len(), 48);
        let (decoded, consumed) = G1Affine::set_bytes(&compressed).unwrap();
        assert_eq!((decoded, consumed), (p, 48));

        let raw = p.raw_bytes();
        assert_eq!(raw.len(), 96);
        let (decoded, consumed) = G1Affine::set_bytes(&raw).unwrap();
        assert_eq!((decoded, consumed), (p, 96));

        let q = G2Affine::rand(&mut rng);
        let (decoded, consumed) = G2Affine::set_bytes(&q.bytes()).unwrap();
        assert_eq!((decoded, consumed), (q, 96));
        let (decoded, consumed) = G2Affine::set_bytes(&q.raw_bytes()).unwrap();
        assert_eq!((decoded, consumed), (q, 192));
    }
}

#[test]
fn identity_encodings() {
    let id = G1Affine::zero();
    let compressed = id.bytes();
    assert_eq!(compressed[0], 0xc0);
    assert!(compressed[1..].iter().all(|&b| b == 0));
    let raw = id.raw_bytes();
    assert_eq!(raw[0], 0x40);
    assert!(raw[1..].iter().all(|&b| b == 0));

    assert!(G1Affine::set_bytes(&compressed).unwrap().0.is_zero());
    assert!(G1Affine::set_bytes(&raw).unwrap().0.is_zero());

    // infinity metadata wins over a non-zero payload (permissive decode)
    let mut noisy = raw.clone();
    noisy[17] = 0xff;
    assert!(G1Affine::set_bytes(&noisy).unwrap().0.is_zero());
}

#[test]
fn known_encoding_vectors() {
    let gen = G1Affine::prime_subgroup_generator();
    assert_eq!(
        gen.bytes(),
        from_hex(
            "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac58\
             6c55e83ff97a1aeffb3af00adb22c6bb"
        )
    );
    assert_eq!(
        gen.raw_bytes(),
        from_hex(
            "17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac58\
             6c55e83ff97a1aeffb3af00adb22c6bb08b3f481e3aaa0f1a09e30ed741d8ae4\
             fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1"
        )
    );
    assert_eq!(
        gen.mul(BigInteger256::from(5)).into_affine().bytes(),
        from_hex(
            "b0e7791fb972fe014159aa33a98622da3cdc98ff707965e536d8636b5fcc5ac7\
             a91a8c46e59a00dca575af0f18fb13dc"
        )
    );

    let gen2 = G2Affine::prime_subgroup_generator();
    assert_eq!(
        gen2.bytes(),
        from_hex(
            "93e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049\
             334cf11213945d57e5ac7d055d042b7e024aa2b2f08f0a91260805272dc51051\
             c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8"
        )
    );
}

#[test]
fn doubling_known_vector() {
    // [2]G1 computed independently
    let two_g = G1Projective::prime_subgroup_generator().double().into_affine();
    let expected_x = Fq::from_mont(BigInteger384([
        0x53e978ce58a9ba3c,
        0x3ea0583c4f3d65f9,
        0x4d20bb47f0012960,
        0xa54c664ae5b2b5d9,
        0x26b552a39d7eb21f,
        0x0008895d26e68785,
    ]));
    let expected_y = Fq::from_mont(BigInteger384([
        0x70110b3298293940,
        0xda33c5393f1f6afc,
        0xb86edfd16a5aa785,
        0xaec6d1c9e7b1c895,
        0x25cfc2b522d11720,
        0x06361c83f8d09b15,
    ]));
    assert_eq!(two_g, GroupAffine::new(expected_x, expected_y));
}

#[test]
fn decode_rejects_short_buffers() {
    let gen = G1Affine::prime_subgroup_generator();
    let compressed = gen.bytes();
    assert!(matches!(
        G1Affine::set_bytes(&compressed[..47]),
        Err(SerializationError::ShortBuffer)
    ));
    let mut raw = gen.raw_bytes();
    raw.truncate(95);
    assert!(matches!(
        G1Affine::set_bytes(&raw),
        Err(SerializationError::ShortBuffer)
    ));
}

#[test]
fn decode_rejects_off_curve_points() {
    // x = 1 gives y² = 5, a non-residue in Fq
    let mut buf = from_hex("000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001");
    buf[0] |= 0x80;
    assert!(matches!(
        G1Affine::set_bytes(&buf),
        Err(SerializationError::NoSquareRoot)
    ));

    // an uncompressed pair that satisfies no curve equation
    let gen = G1Affine::prime_subgroup_generator();
    let mut raw = gen.raw_bytes();
    raw[95] ^= 1;
    assert!(matches!(
        G1Affine::set_bytes(&raw),
        Err(SerializationError::NotOnCurve)
    ));
}

#[test]
fn decode_rejects_off_subgroup_points() {
    // (4, y) is on the curve but in the cofactor component
    let x = Fq::from_repr(BigInteger384::from(4));
    let y = Fq::read_be(&from_hex(
        "0a989badd40d6212b33cffc3f3763e9bc760f988c9926b26da9dd85e92848344\
         6346b8ed00e1de5d5ea93e354abe706c",
    ));
    let p = GroupAffine::<crate::curves::bls12_381::g1::Bls12_381G1Parameters>::new(x, y);
    assert!(p.is_on_curve());
    assert!(!p.is_in_subgroup());

    let mut compressed = from_hex("000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000004");
    compressed[0] |= 0x80;
    assert!(matches!(
        G1Affine::set_bytes(&compressed),
        Err(SerializationError::NotInSubgroup)
    ));
    assert!(matches!(
        G1Affine::set_bytes(&p.raw_bytes()),
        Err(SerializationError::NotInSubgroup)
    ));

    // G2: X = 1 + u is on the twist but off the subgroup
    let q = g2::G2Affine::new(
        crate::fields::bls12_381::Fq2::new(Fq::one(), Fq::one()),
        crate::fields::bls12_381::Fq2::new(
            Fq::read_be(&from_hex(
                "17faa6201231304f270b858dad9462089f2a5b83388e4b10773abc1eef6d193b\
                 9fce4e8ea2d9d28e3c3a315aa7de14ca",
            )),
            Fq::read_be(&from_hex(
                "00cc12449be6ac4e7f367e7242250427c4fb4c39325d3164ad397c1837a90f0e\
                 a1a534757df374dd6569345eb41ed76e",
            )),
        ),
    );
    assert!(q.is_on_curve());
    assert!(!q.is_in_subgroup());
    assert!(matches!(
        G2Affine::set_bytes(&q.raw_bytes()),
        Err(SerializationError::NotInSubgroup)
    ));
}

#[test]
fn psi_fixes_the_subgroup_eigenvalue() {
    let mut rng = test_rng();
    // psi(Q) = [x]Q on the subgroup, with x the (negative) curve parameter
    let x_abs = BigInteger256([0xd201000000010000, 0, 0, 0]);
    for _ in 0..5 {
        let q = G2Projective::rand(&mut rng);
        let psi_q = g2::psi(&q.into_affine()).into_projective();
        assert_eq!(psi_q, -q.mul_windowed(&x_abs));
    }
}

#[test]
fn streaming_round_trip() {
    let mut rng = test_rng();
    let points: Vec<G1Affine> = (0..9).map(|_| G1Affine::rand(&mut rng)).collect();

    let mut buf = Vec::new();
    let mut enc = Encoder::new(&mut buf);
    enc.encode_slice(&points).unwrap();
    assert_eq!(enc.bytes_written(), 4 + 9 * 48);

    let mut dec = Decoder::new(buf.as_slice());
    let decoded: Vec<G1Affine> = dec.decode_slice().unwrap();
    assert_eq!(decoded, points);

    // raw mode, single points, mixed identity
    let mut buf = Vec::new();
    let mut enc = Encoder::raw(&mut buf);
    enc.encode(&points[0]).unwrap();
    enc.encode(&G1Affine::zero()).unwrap();
    let mut dec = Decoder::new(buf.as_slice());
    assert_eq!(dec.decode::<crate::curves::bls12_381::g1::Bls12_381G1Parameters>().unwrap(), points[0]);
    assert!(dec
        .decode::<crate::curves::bls12_381::g1::Bls12_381G1Parameters>()
        .unwrap()
        .is_zero());
}

#[test]
fn batch_decode_surfaces_one_error() {
    let mut rng = test_rng();
    let points: Vec<G1Affine> = (0..6).map(|_| G1Affine::rand(&mut rng)).collect();
    let mut buf = Vec::new();
    Encoder::new(&mut buf).encode_slice(&points).unwrap();
    // corrupt one compressed x so its y² becomes a non-residue
    buf[4 + 48 + 47] ^= 1;
    let mut dec = Decoder::new(buf.as_slice());
    let res: Result<Vec<G1Affine>, _> = dec.decode_slice();
    match res {
        Err(SerializationError::BatchDecode) => (),
        Err(SerializationError::NotInSubgroup) | Err(SerializationError::NoSquareRoot) => {
            panic!("batched decode must aggregate failures")
        }
        other => panic!("expected a batch decode failure, got {:?}", other.map(|_| ())),
    }
}
