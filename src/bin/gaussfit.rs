use std::path::Path;

use gaussfit::{value::CoordExt, GaussNewton, ModelKind, QrMethod};

const USAGE: &str = "Usage: gaussfit <path> [model=quadratic|exponential|logarithmic|rational] \
[guess=a,b,c] [iterations=<number>] [method=householder|givens] [tolerance=<number>]";

fn main() {
    env_logger::init();

    //
    // First argument is the path to a file with one `x,y` point per line.
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Please provide a path to a file with one x,y point per line.");
        eprintln!("{USAGE}");
        std::process::exit(1);
    };
    if path == "help" || path == "--help" || path == "-h" {
        eprintln!("{USAGE}");
        std::process::exit(0);
    }

    let mut model = ModelKind::Quadratic;
    let mut guess = None;
    let mut solver = GaussNewton::new();
    for arg in std::env::args().skip(2) {
        if arg == "help" || arg == "--help" || arg == "-h" {
            eprintln!("{USAGE}");
            std::process::exit(0);
        }

        let Some((key, value)) = arg.split_once('=') else {
            fail(&format!("Expected key=value, got `{arg}`"));
        };

        match key {
            "model" => model = value.parse().unwrap_or_else(|e| fail(&e)),
            "method" => {
                let method: QrMethod = value.parse().unwrap_or_else(|e| fail(&e));
                solver = solver.with_method(method);
            }
            "iterations" => match value.parse::<usize>() {
                Ok(n) => solver = solver.with_iterations(n),
                Err(_) => fail(&format!("Invalid iterations value: {value}")),
            },
            "tolerance" => match value.parse::<f64>() {
                Ok(t) if t >= 0.0 => solver = solver.with_tolerance(t),
                _ => fail(&format!("Invalid tolerance value: {value}")),
            },
            "guess" => match parse_guess(value) {
                Some(g) => guess = Some(g),
                None => fail(&format!("Invalid guess, expected a,b,c: {value}")),
            },
            _ => fail(&format!("Unknown option: {key}")),
        }
    }

    let guess = guess.unwrap_or_else(|| model.default_guess());
    let fit = solver
        .fit(&model, Path::new(&path), guess)
        .unwrap_or_else(|e| fail(&e));

    let [a, b, c] = *fit.params();
    println!("{fit}");
    println!("a = {a}");
    println!("b = {b}");
    println!("c = {c}");
    if let Some(range) = fit.data().x_range() {
        println!(
            "{} points over x in [{}, {}]",
            fit.data().len(),
            range.start,
            range.end
        );
    }
    println!(
        "{} iterations with {} QR, |r| = {:e}, R² = {:.4}",
        fit.iterations(),
        solver.method(),
        fit.residual_norm(),
        fit.r_squared()
    );

    std::process::exit(0);
}

fn parse_guess(value: &str) -> Option<[f64; 3]> {
    let mut parts = value.split(',').map(str::trim);
    let a = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    let c = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some([a, b, c])
}

fn fail(message: &dyn std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
