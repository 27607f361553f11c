//! Decoder for the `toml-test` suite: reads TOML on stdin and prints the
//! tagged JSON encoding on stdout, or a diagnostic on stderr and exit code 1.

use serde_json::{Map, Value as Json, json};
use std::io::Read;
use toml_bridge::{DateTime, Native, ParseOptions, TemporalKind};
use tracing_subscriber::EnvFilter;

fn datetime_to_toml_kind(dt: &DateTime) -> &'static str {
    match dt.kind() {
        TemporalKind::OffsetDateTime => "datetime",
        TemporalKind::LocalDateTime => "datetime-local",
        TemporalKind::LocalDate => "date-local",
        TemporalKind::LocalTime => "time-local",
    }
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f == f64::INFINITY {
        "inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        f.to_string()
    }
}

fn tagged(kind: &str, value: String) -> Json {
    json!({ "type": kind, "value": value })
}

fn encode(native: &Native) -> Json {
    match native {
        Native::Text(s) => tagged("string", s.clone()),
        Native::Int(i) => tagged("integer", i.to_string()),
        Native::Float(f) => tagged("float", float_text(*f)),
        Native::Bool(b) => tagged("bool", b.to_string()),
        Native::Temporal(dt) => tagged(datetime_to_toml_kind(dt), dt.to_string()),
        Native::Seq(seq) => Json::Array(seq.iter().map(encode).collect()),
        Native::Map(map) => {
            let mut obj = Map::with_capacity(map.len());
            for (key, value) in map {
                obj.insert(key.clone(), encode(value));
            }
            Json::Object(obj)
        }
    }
}

fn options_from_env() -> ParseOptions {
    let options = ParseOptions::new();
    match std::env::var("TOML_BRIDGE_MAX_DEPTH") {
        Ok(raw) => match raw.parse() {
            Ok(depth) => options.with_max_depth(depth),
            Err(_) => {
                tracing::warn!(value = %raw, "ignoring invalid TOML_BRIDGE_MAX_DEPTH");
                options
            }
        },
        Err(_) => options,
    }
}

fn report(err: &toml_bridge::Error, content: &[u8]) -> std::io::Result<()> {
    use codespan_reporting::files::SimpleFiles;
    use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

    let mut files = SimpleFiles::new();
    let file_id = files.add("input.toml", String::from_utf8_lossy(content).into_owned());
    let diagnostic = err.to_diagnostic(file_id);
    let writer = StandardStream::stderr(ColorChoice::Auto);
    let config = codespan_reporting::term::Config::default();

    codespan_reporting::term::emit_to_io_write(&mut writer.lock(), &config, &files, &diagnostic)
        .map_err(std::io::Error::other)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut buffer = Vec::new();
    if let Err(err) = std::io::stdin().lock().read_to_end(&mut buffer) {
        eprintln!("failed to read stdin: {err}");
        std::process::exit(1)
    }

    match toml_bridge::parse_native_slice_with(&buffer, &options_from_env()) {
        Ok(native) => println!("{}", encode(&native)),
        Err(err) => {
            if report(&err, &buffer).is_err() {
                eprintln!("{err}");
            }
            std::process::exit(1)
        }
    }
}
