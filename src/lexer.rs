use crate::error::AsmError;

/// One source line split into its parts. All fields empty for blank or
/// comment-only lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statement {
    pub label: Option<String>,
    pub mnemonic: Option<String>,
    pub operands: Vec<String>,
}

impl Statement {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.mnemonic.is_none()
    }
}

/// Split on whitespace and commas outside quotes; `;` outside quotes ends the line.
pub fn tokenize(line: &str) -> Result<Vec<String>, AsmError> {
    let mut tokens = Vec::new();
    let mut cur = String::new();
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) => {
                cur.push(c);
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                ';' => break,
                '"' | '\'' => {
                    quote = Some(c);
                    cur.push(c);
                }
                c if c == ',' || c.is_whitespace() => {
                    if !cur.is_empty() {
                        tokens.push(std::mem::take(&mut cur));
                    }
                }
                _ => cur.push(c),
            },
        }
    }
    if quote.is_some() {
        return Err(AsmError::UnterminatedString(line.trim().to_string()));
    }
    if !cur.is_empty() {
        tokens.push(cur);
    }
    Ok(tokens)
}

pub fn parse_statement(line: &str) -> Result<Statement, AsmError> {
    let mut tokens = tokenize(line)?.into_iter();
    let mut stmt = Statement::default();

    let Some(first) = tokens.next() else {
        return Ok(stmt);
    };
    let label = if first.starts_with(['"', '\'']) {
        None
    } else {
        first.strip_suffix(':').map(str::to_string)
    };
    let first = match label {
        Some(name) => {
            stmt.label = Some(name);
            match tokens.next() {
                Some(next) => next,
                None => return Ok(stmt),
            }
        }
        None => first,
    };
    stmt.mnemonic = Some(first);
    stmt.operands = tokens.collect();
    Ok(stmt)
}
