use crate::error_handling::*;
use crate::scanning::*;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    addition,
    subtraction,
    scaling,
    dot_product,
    cross_product,
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidOperator;

impl FromStr for BinaryOperator {
    type Err = InvalidOperator;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        use BinaryOperator::*;
        match s {
            "+" => Ok(addition),
            "-" => Ok(subtraction),
            "*" => Ok(scaling),
            "." => Ok(dot_product),
            "x" | "X" => Ok(cross_product),
            _ => Err(InvalidOperator),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Command {
    quit,
    help,
    list,
    clear,
    load(PathBuf),
    save(PathBuf),
    query(char),
    literal {
        target: char,
        components: [f64; 3],
    },
    expression {
        target: char,
        left: Token,
        operator: BinaryOperator,
        right: Token,
    },
}

/// `load <path>` / `save <path>`; `None` when the line is not that directive at all.
fn parse_file_directive(line: &str, keyword: &'static str) -> Option<Result<PathBuf>> {
    let rest = line.strip_prefix(keyword)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let path = rest.trim();
    if path.is_empty() {
        Some(Err(CalcError::missing_filename(keyword)))
    } else {
        Some(Ok(PathBuf::from(path)))
    }
}

fn parse_assignment(tokens: &[Token]) -> Result<Command> {
    let [lhs, eq, rest @ ..] = tokens else {
        return Err(CalcError::invalid_format);
    };
    if eq.content != "=" {
        return Err(CalcError::invalid_format);
    }
    let target = lhs
        .as_identifier()
        .ok_or_else(|| CalcError::invalid_identifier(lhs.content.clone()))?;

    match rest {
        [x, y, z] => {
            if let (Some(x), Some(y), Some(z)) = (x.as_literal(), y.as_literal(), z.as_literal()) {
                return Ok(Command::literal{target, components: [x, y, z]});
            }
            let operator = y
                .content
                .parse()
                .map_err(|_| CalcError::unknown_operator(y.content.clone()))?;
            Ok(Command::expression{target, left: x.clone(), operator, right: z.clone()})
        },
        _ => Err(CalcError::invalid_format),
    }
}

/// Classifies one input line; the first matching shape wins.
pub fn parse(line: &str) -> Result<Command> {
    match line {
        "quit" => return Ok(Command::quit),
        "help" => return Ok(Command::help),
        "list" => return Ok(Command::list),
        "clear" => return Ok(Command::clear),
        _ => {},
    }

    if let Some(path) = parse_file_directive(line, "load") {
        return path.map(Command::load);
    }
    if let Some(path) = parse_file_directive(line, "save") {
        return path.map(Command::save);
    }

    let mut chars = line.chars();
    if let (Some(name), None) = (chars.next(), chars.next()) {
        if name.is_ascii_alphabetic() {
            return Ok(Command::query(name));
        }
    }

    let tokens = StringScanner::new(line).collect_tokens();
    parse_assignment(&tokens)
}
