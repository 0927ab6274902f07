use gaussfit::{
    assert_params_close,
    error::Error,
    gauss_newton,
    model::{Exponential, Logarithmic, Model, ModelKind, Params, Quadratic, Rational},
    points::read_points,
    GaussNewton, QrMethod,
};

const QUADRATIC: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/quadratic.txt");
const EXPONENTIAL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/exponential.txt");
const LOGARITHMIC: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/logarithmic.txt");
const RATIONAL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/rational.txt");

/// Fits a fixture with both factorizations and checks the result against the generating curve.
fn check_fixture<M: Model>(path: &str, model: &M, guess: Params, expected: Params) {
    for method in QrMethod::ALL {
        let params = gauss_newton(path, guess, 5, method, model).unwrap();
        assert_params_close!(params, expected, 0.5, "{} with {method}", model.name());
    }
}

#[test]
fn test_quadratic_fixture() {
    check_fixture(QUADRATIC, &Quadratic, [1.0, 3.0, -1.0], [0.16, 2.0, 0.85]);
}

#[test]
fn test_exponential_fixture() {
    check_fixture(EXPONENTIAL, &Exponential, [-0.3, 0.3, 0.3], [-0.2, 0.5, -0.07]);
}

#[test]
fn test_logarithmic_fixture() {
    check_fixture(LOGARITHMIC, &Logarithmic, [-2.0, 10.0, 5.0], [-3.02, 7.8, 2.1]);
}

#[test]
fn test_rational_fixture() {
    check_fixture(RATIONAL, &Rational, [0.9, 0.2, 0.1], [0.35, 0.85, 0.038]);
}

#[test]
fn test_factorizations_agree() {
    for (model, path) in ModelKind::ALL
        .into_iter()
        .zip([QUADRATIC, EXPONENTIAL, LOGARITHMIC, RATIONAL])
    {
        let guess = model.default_guess();
        let householder = gauss_newton(path, guess, 5, QrMethod::Householder, &model).unwrap();
        let givens = gauss_newton(path, guess, 5, QrMethod::Givens, &model).unwrap();
        assert_params_close!(householder, givens, 0.5, "{model}");
    }
}

#[test]
fn test_fit_quality() {
    let model = ModelKind::Quadratic;
    let fit = GaussNewton::new()
        .fit(&model, QUADRATIC, model.default_guess())
        .unwrap();

    assert_eq!(fit.iterations(), 5);
    assert_eq!(fit.data().len(), 24);
    assert!(fit.r_squared() > 0.99, "R² = {}", fit.r_squared());

    // Later iterations never make a linear fit worse
    let history = fit.history();
    assert!(history.last().unwrap() <= history.first().unwrap());
}

#[test]
fn test_early_stop_on_linear_model() {
    let fit = GaussNewton::new()
        .with_iterations(20)
        .with_tolerance(1e-9)
        .fit(&Quadratic, QUADRATIC, [1.0, 3.0, -1.0])
        .unwrap();

    assert!(fit.converged());
    assert!(fit.iterations() < 20);
}

#[test]
fn test_points_in_memory_match_file() {
    let points: Vec<(f64, f64)> = read_points(RATIONAL).unwrap();
    let guess = [0.9, 0.2, 0.1];

    let from_file = gauss_newton(RATIONAL, guess, 5, QrMethod::Givens, &Rational).unwrap();
    let from_memory = gauss_newton(&points, guess, 5, QrMethod::Givens, &Rational).unwrap();
    assert_eq!(from_file, from_memory);
}

#[test]
#[cfg(feature = "transforms")]
fn test_noisy_synthetic_data() {
    use gaussfit::{transforms::ApplyNoise, value::SteppedValues};

    let truth = [1.5, 0.25, -2.0];
    let data: Vec<(f64, f64)> = SteppedValues::new(0.0..=6.0, 0.25)
        .map(|x| (x, Exponential.y(&truth, x)))
        .collect::<Vec<_>>()
        .apply_normal_noise(0.01, Some(11));

    let fit = GaussNewton::new()
        .with_iterations(10)
        .fit(&Exponential, &data, [1.0, 0.2, -1.0])
        .unwrap();
    assert_params_close!(fit.params(), truth, 0.1);
}

#[test]
fn test_missing_file() {
    let result = gauss_newton(
        "tests/data/does_not_exist.txt",
        [1.0, 3.0, -1.0],
        5,
        QrMethod::Householder,
        &Quadratic,
    );
    assert!(matches!(result, Err(Error::Io { .. })), "{result:?}");
}
