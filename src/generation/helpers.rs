//! Helper functions exposed to templates
//!
//! Each render gets its own [`HelperRegistry`], whose closures capture that
//! render's sink and duplicate filter. Nothing is shared between templates.
//!
//! | Function | Arguments | Result |
//! |---|---|---|
//! | `SetFileName` | `name` | switches the output file, renders nothing |
//! | `ToUpper` / `ToLower` | `s` | case conversion |
//! | `HasPrefix` | `s`, `prefix` | bool |
//! | `CapitalizeFirstLetter` / `ToPrefix` | `s` | first character uppercased |
//! | `IsNil` | `value` | `true` when missing or `null` |
//! | `IsDuplicate` | `collection`, `value` | `false` on first sight, then `true` |
//!
//! The string transforms are registered as filters too, so
//! `{{ service.name | CapitalizeFirstLetter }}` works.
//!
//! Call `SetFileName` at the top level or inside `for`, `if` and `include`
//! bodies. Tera buffers macro calls and `{% filter %}` blocks and writes them
//! only when they finish, so anything such a block emits before its
//! `SetFileName` call ends up in the new file. A macro can still compute the
//! name: `{% set file = self::file_for(id=s.id) %}{{ SetFileName(name=file) }}`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tera::{Error as TeraError, Result as TeraResult, Tera, Value};

use crate::core::utils::capitalize_first_letter;
use crate::generation::{DuplicateFilter, SharedSink};

pub const SET_FILE_NAME: &str = "SetFileName";
pub const TO_UPPER: &str = "ToUpper";
pub const TO_LOWER: &str = "ToLower";
pub const HAS_PREFIX: &str = "HasPrefix";
pub const CAPITALIZE_FIRST_LETTER: &str = "CapitalizeFirstLetter";
pub const TO_PREFIX: &str = "ToPrefix";
pub const IS_NIL: &str = "IsNil";
pub const IS_DUPLICATE: &str = "IsDuplicate";

type StringTransform = fn(&str) -> String;

/// The helper set bound to one render's sink and duplicate filter
pub struct HelperRegistry {
    sink: SharedSink,
    filter: Arc<Mutex<DuplicateFilter>>,
}

impl HelperRegistry {
    pub fn new(sink: SharedSink, filter: DuplicateFilter) -> Self {
        Self {
            sink,
            filter: Arc::new(Mutex::new(filter)),
        }
    }

    /// Names of every function this registry installs
    pub fn function_names() -> &'static [&'static str] {
        &[
            SET_FILE_NAME,
            TO_UPPER,
            TO_LOWER,
            HAS_PREFIX,
            CAPITALIZE_FIRST_LETTER,
            TO_PREFIX,
            IS_NIL,
            IS_DUPLICATE,
        ]
    }

    /// Install all helpers into `tera`
    pub fn register(&self, tera: &mut Tera) {
        let sink = self.sink.clone();
        tera.register_function(
            SET_FILE_NAME,
            move |args: &HashMap<String, Value>| -> TeraResult<Value> {
                let name = string_arg(SET_FILE_NAME, args, "name")?;
                sink.set_current_file(name).map_err(|e| {
                    TeraError::chain(format!("{SET_FILE_NAME}(name=\"{name}\") failed"), e)
                })?;
                Ok(Value::String(String::new()))
            },
        );

        register_string_transform(tera, TO_UPPER, str::to_uppercase);
        register_string_transform(tera, TO_LOWER, str::to_lowercase);
        register_string_transform(tera, CAPITALIZE_FIRST_LETTER, capitalize_first_letter);
        register_string_transform(tera, TO_PREFIX, capitalize_first_letter);

        tera.register_function(
            HAS_PREFIX,
            |args: &HashMap<String, Value>| -> TeraResult<Value> {
                let s = string_arg(HAS_PREFIX, args, "s")?;
                let prefix = string_arg(HAS_PREFIX, args, "prefix")?;
                Ok(Value::Bool(s.starts_with(prefix)))
            },
        );

        tera.register_function(
            IS_NIL,
            |args: &HashMap<String, Value>| -> TeraResult<Value> {
                Ok(Value::Bool(is_nil(args.get("value"))))
            },
        );

        let filter = Arc::clone(&self.filter);
        tera.register_function(
            IS_DUPLICATE,
            move |args: &HashMap<String, Value>| -> TeraResult<Value> {
                let collection = string_arg(IS_DUPLICATE, args, "collection")?;
                let value = string_arg(IS_DUPLICATE, args, "value")?;
                let duplicate = filter
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .is_duplicate(collection, value);
                Ok(Value::Bool(duplicate))
            },
        );
    }
}

/// Absent optional structures reach templates as `null`
pub fn is_nil(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn register_string_transform(tera: &mut Tera, name: &'static str, transform: StringTransform) {
    tera.register_function(
        name,
        move |args: &HashMap<String, Value>| -> TeraResult<Value> {
            let s = string_arg(name, args, "s")?;
            Ok(Value::String(transform(s)))
        },
    );
    tera.register_filter(
        name,
        move |value: &Value, _args: &HashMap<String, Value>| -> TeraResult<Value> {
            match value.as_str() {
                Some(s) => Ok(Value::String(transform(s))),
                None => Err(TeraError::msg(format!(
                    "Filter `{name}` expected a string, got {value}"
                ))),
            }
        },
    );
}

fn string_arg<'a>(
    helper: &str,
    args: &'a HashMap<String, Value>,
    key: &str,
) -> TeraResult<&'a str> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(TeraError::msg(format!(
            "Function `{helper}` expected a string for argument `{key}`, got {other}"
        ))),
        None => Err(TeraError::msg(format!(
            "Function `{helper}` is missing the `{key}` argument"
        ))),
    }
}
