use crate::computing::{self, Vector};
use crate::error_handling::*;
use crate::parsing::*;
use crate::persisting;
use crate::scanning::Token;
use crate::storing::VectorTable;

pub enum Reply {
    quit,
    lines(Vec<String>),
}

pub fn help_text(capacity: usize) -> Vec<String> {
    vec![
        "Welcome to Mini-MATLAB!".into(),
        format!("You can create up to {capacity} vectors."),
        "Commands:".into(),
        "  a = x y z              -> create vector".into(),
        "  a = b + c              -> add vectors".into(),
        "  d = a - b              -> subtract vectors".into(),
        "  e = 3 * b or e = b * 3 -> scalar multiply".into(),
        "  h = a . b              -> dot product".into(),
        "  g = a x b              -> cross product".into(),
        "  list                   -> show all vectors".into(),
        "  clear                  -> delete all vectors".into(),
        "  load <file>            -> replace vectors with a saved file".into(),
        "  save <file>            -> write vectors to a file".into(),
        "  a                      -> show vector values".into(),
        "  help                   -> show this help".into(),
        "  quit                   -> exit program".into(),
    ]
}

/// An operand token read both ways at once; each operator consults the reading it needs.
struct Operand<'a> {
    vector: Option<&'a Vector>,
    scalar: Option<f64>,
}

impl<'a> Operand<'a> {
    fn resolve(token: &Token, table: &'a VectorTable) -> Self {
        Self {
            vector: token.lead().and_then(|name| table.find(name)),
            scalar: token.as_scalar(),
        }
    }
}

fn both_vectors(left: &Operand, right: &Operand, error: CalcError) -> Result<(Vector, Vector)> {
    match (left.vector, right.vector) {
        (Some(a), Some(b)) => Ok((*a, *b)),
        _ => Err(error),
    }
}

/// What an expression produces before anything is written to the table.
enum Outcome {
    vector(Vector),
    scalar(f64),
}

fn compute(operator: BinaryOperator, left: &Operand, right: &Operand) -> Result<Outcome> {
    use BinaryOperator::*;
    use Outcome::*;

    match operator {
        addition => {
            let (a, b) = both_vectors(left, right, CalcError::addition_operands)?;
            Ok(vector(computing::add(&a, &b)))
        },
        subtraction => {
            let (a, b) = both_vectors(left, right, CalcError::subtraction_operands)?;
            Ok(vector(computing::subtract(&a, &b)))
        },
        scaling => {
            let scalar_first = left.scalar.zip(right.vector);
            let vector_first = right.scalar.zip(left.vector);
            match (scalar_first, vector_first) {
                (Some((s, v)), None) | (None, Some((s, v))) => Ok(vector(computing::scale(v, s))),
                _ => Err(CalcError::scaling_format),
            }
        },
        dot_product => {
            let (a, b) = both_vectors(left, right, CalcError::dot_operands)?;
            Ok(scalar(computing::dot(&a, &b)))
        },
        cross_product => {
            let (a, b) = both_vectors(left, right, CalcError::cross_operands)?;
            Ok(vector(computing::cross(&a, &b)))
        },
    }
}

fn report(error: CalcError) -> Reply {
    tracing::debug!(%error, "command failed");
    Reply::lines(vec![format!("Error: {error}")])
}

pub struct Session {
    table: VectorTable,
}

impl Session {
    pub fn new(capacity: usize) -> Self {
        Self{table: VectorTable::new(capacity)}
    }

    pub fn table(&self) -> &VectorTable {
        &self.table
    }

    /// Parses and executes one line, rendering any error as an `Error: ` line.
    pub fn run_line(&mut self, line: &str) -> Reply {
        match parse(line) {
            Ok(command) => self.run_command(command),
            Err(error) => report(error),
        }
    }

    pub fn run_command(&mut self, command: Command) -> Reply {
        tracing::debug!(?command, "executing");
        self.execute(command).unwrap_or_else(report)
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        use Command::*;

        let lines = match command {
            quit => return Ok(Reply::quit),
            help => help_text(self.table.capacity()),
            list => self.table.list().iter().map(|vector| format!("- {vector}")).collect(),
            clear => {
                self.table.clear();
                vec!["All vectors cleared.".into()]
            },
            load(path) => {
                let report = persisting::load(&path, &mut self.table)?;
                let mut lines: Vec<String> = report.warnings.iter().map(|warning| format!("Warning: {warning}")).collect();
                if report.truncated {
                    lines.push(format!("Warning: {} Remaining lines ignored.", CalcError::capacity_exceeded));
                }
                lines.push(format!("Loaded {} vectors from '{}'.", report.loaded, path.display()));
                lines
            },
            save(path) => {
                let saved = persisting::save(&path, &self.table)?;
                vec![format!("Saved {saved} vectors to '{}'.", path.display())]
            },
            query(name) => {
                let vector = self.table.find(name).ok_or(CalcError::not_found(name))?;
                vec![vector.to_string()]
            },
            literal{target, components: [x, y, z]} => {
                let slot = self.table.create_or_get(target)?;
                *slot = Vector::new(target, x, y, z);
                vec![slot.to_string()]
            },
            expression{target, left, operator, right} => vec![self.evaluate(target, &left, operator, &right)?],
        };
        Ok(Reply::lines(lines))
    }

    fn evaluate(&mut self, target: char, left: &Token, operator: BinaryOperator, right: &Token) -> Result<String> {
        // a dot product still reserves its destination, even though nothing is stored there
        if operator == BinaryOperator::dot_product {
            self.table.create_or_get(target)?;
        }

        let outcome = {
            let left = Operand::resolve(left, &self.table);
            let right = Operand::resolve(right, &self.table);
            compute(operator, &left, &right)?
        };

        match outcome {
            Outcome::scalar(value) => Ok(format!("{target} = {value:.2}")),
            Outcome::vector(result) => {
                let slot = self.table.create_or_get(target)?;
                *slot = result.named(target);
                Ok(slot.to_string())
            },
        }
    }
}
