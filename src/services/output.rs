use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use crate::guide::GuideError;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(json: bool, data: T, row: impl Fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Like `print_one`, but the human form is a prebuilt multi-line rendering.
pub fn print_render<T: Serialize>(json: bool, data: T, text: &str) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", text);
    }
    Ok(())
}

/// Failure envelope. Machine codes come from `GuideError`; anything else
/// reports as a generic ERROR.
pub fn emit_error(json: bool, err: &anyhow::Error) {
    let code = err
        .downcast_ref::<GuideError>()
        .map(GuideError::code)
        .unwrap_or("ERROR");
    if json {
        let out = JsonErr {
            ok: false,
            error: ErrorBody {
                code: code.to_string(),
                message: format!("{:#}", err),
            },
        };
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{}", s),
            Err(_) => eprintln!("error: {:#}", err),
        }
    } else {
        eprintln!("error: {:#}", err);
    }
}
