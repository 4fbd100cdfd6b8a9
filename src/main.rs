use arith_eval::evaluate;
use clap::Parser;

const SAMPLE_EXPRESSION: &str = "1-(2*age)+1";
const SAMPLE_BINDINGS: &str = r#"[{"key":"age","value":18}]"#;

/// Evaluates an arithmetic expression with variables bound from a JSON list.
#[derive(Debug, Parser)]
#[command(name = "arith-eval")]
struct Args {
    /// Expression to evaluate. Without it the sample expression is evaluated.
    expression: Option<String>,

    /// Bindings as `[{"key": "age", "value": 18}]`.
    #[arg(default_value = "[]")]
    bindings: String,
}

impl Args {
    fn into_input(self) -> (String, String) {
        match self.expression {
            Some(expression) => (expression, self.bindings),
            None => (SAMPLE_EXPRESSION.to_string(), SAMPLE_BINDINGS.to_string()),
        }
    }
}

fn main() {
    pretty_env_logger::init();

    let (expression, bindings) = Args::parse().into_input();
    println!("{}", evaluate(&expression, &bindings));
}
