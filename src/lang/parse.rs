use super::{Error, Instruction};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// Parses one `;`-terminated statement into an [`Instruction`].
///
/// A single left-to-right scan. `<...>` collects the guard, `@...:` the
/// operation name, `(...)` the parameters and `~...;` the return address.
/// Parameters split on commas except inside quotes or brackets; quote and
/// bracket characters stay in the token. Omitted fields default to a `true`
/// guard and a `nullptr` return address.
pub fn parse(line: &str) -> Result<Instruction> {
    let mut guard = String::new();
    let mut op = String::new();
    let mut params: Vec<String> = vec![];
    let mut ret = String::new();
    let mut param = String::new();

    let mut in_guard = false;
    let mut in_op = false;
    let mut in_params = false;
    let mut in_ret = false;
    let mut in_quote = false;
    let mut in_bracket = false;

    for c in line.chars() {
        if c == '<' && !in_guard && !in_quote {
            in_guard = true;
            continue;
        }
        if c == '>' && in_guard && !in_quote {
            in_guard = false;
            continue;
        }
        if c == '(' && !in_params && !in_quote {
            in_params = true;
            continue;
        }
        if c == ')' && in_params && !in_quote {
            if !param.is_empty() {
                params.push(std::mem::take(&mut param));
            }
            in_params = false;
            continue;
        }
        if c == '@' && !in_op && !in_quote {
            in_op = true;
            continue;
        }
        if c == ':' && in_op && !in_quote {
            in_op = false;
            continue;
        }
        if c == '~' && !in_ret && !in_quote {
            in_ret = true;
            continue;
        }
        if c == ';' && in_ret && !in_quote {
            in_ret = false;
            continue;
        }

        if in_guard && c != ' ' {
            guard.push(c);
        }
        if in_op && c != ' ' {
            op.push(c);
        }
        if in_ret && c != ' ' {
            ret.push(c);
        }

        if in_params {
            if c != ',' || in_quote || in_bracket {
                param.push(c);
            } else if !param.is_empty() {
                params.push(std::mem::take(&mut param));
            }
        }

        if c == '"' && !in_quote {
            in_quote = true;
            continue;
        }
        if c == '"' && in_quote {
            in_quote = false;
        }

        if c == '[' && !in_bracket && !in_quote {
            in_bracket = true;
            continue;
        }
        if c == ']' && in_bracket && !in_quote {
            in_bracket = false;
        }
    }

    if in_quote {
        return Err(error!(Parse; "unterminated quote in '{}'", line));
    }
    if in_bracket {
        return Err(error!(Parse; "unterminated bracket in '{}'", line));
    }

    if guard.is_empty() {
        guard.push_str("true");
    }
    if ret.is_empty() {
        ret.push_str("nullptr");
    }

    Ok(Instruction {
        guard,
        op,
        params,
        ret,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ins = parse("@flush:();").unwrap();
        assert_eq!(ins.guard, "true");
        assert_eq!(ins.op, "flush");
        assert!(ins.params.is_empty());
        assert_eq!(ins.ret, "nullptr");
    }

    #[test]
    fn test_full_form() {
        let ins = parse("<!$b>@sum:($count,1)~count;").unwrap();
        assert_eq!(ins.guard, "!$b");
        assert_eq!(ins.op, "sum");
        assert_eq!(ins.params, vec!["$count", "1"]);
        assert_eq!(ins.ret, "count");
    }

    #[test]
    fn test_quoted_commas_stay_together() {
        let ins = parse("@print:(\"a, b\",$x);").unwrap();
        assert_eq!(ins.params, vec!["\"a, b\"", "$x"]);
    }

    #[test]
    fn test_bracketed_param() {
        let ins = parse("@new_list:(L,dynamic,[1,2,3]);").unwrap();
        assert_eq!(ins.params, vec!["L", "dynamic", "[1,2,3]"]);
    }

    #[test]
    fn test_empty_trailing_param_dropped() {
        let ins = parse("@print:(a,);").unwrap();
        assert_eq!(ins.params, vec!["a"]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert!(parse("@print:(\"a);").is_err());
    }

    #[test]
    fn test_canonical_form_reparses() {
        let ins = parse("<$go>@subtract:($a,2)~a;").unwrap();
        let printed = ins.to_string().replace(' ', "");
        assert_eq!(parse(&printed).unwrap(), ins);
    }
}
