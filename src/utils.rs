// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use controller::{Field, Value};
use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::collections::HashMap;

macro_rules! field {
    ($ed:ident, $name:expr, $opt:expr, $ty:expr) => {{
        let msg = if $opt {
            format!("{}{} (optional, {}): ", $crate::PROMPT, $name, $ty)
        } else {
            format!("{}{} (required, {}): ", $crate::PROMPT, $name, $ty)
        };

        $ed.readline(&msg)
    }};
}

/// Ask for every field, `None` when the user gives up with CTRL-C.
///
/// Values are only checked against their type here, the rules on what makes
/// a valid record are left to the engine.
pub(crate) fn prompt_prototype<'a>(
    rl: &mut Editor<()>,
    fields: Vec<Field<'a>>,
) -> Result<Option<HashMap<&'a str, Value>>, Error> {
    println!("Press CTRL-D to leave a field empty, CTRL-C to cancel");
    let mut prototype = HashMap::new();

    for field in fields {
        let is_optional = field.is_optional();
        let (name, ty) = field.into_tuple();

        loop {
            let input = match field!(rl, name, is_optional, ty) {
                Ok(line) if line.trim().is_empty() => None,
                Ok(line) => Some(line),

                // CTRL-D
                Err(ReadlineError::Eof) => None,

                // CTRL-C
                Err(ReadlineError::Interrupted) => return Ok(None),

                Err(e) => return Err(e.into()),
            };

            match input {
                Some(input) => match Value::from_str(&input, ty) {
                    Ok(value) => {
                        prototype.insert(name, value);
                        break;
                    }

                    Err(e) => log::error!("Invalid value for '{}': {}", name, e),
                },

                None if is_optional => break,

                None => log::error!("Field '{}' is required, cannot be empty!", name),
            }
        }
    }

    Ok(Some(prototype))
}
