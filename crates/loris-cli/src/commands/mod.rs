// Command handlers and shared argument parsing helpers.
//
// The helpers convert CLI string arguments into typed values and exit
// with a short message on anything unknown.

pub(crate) mod diagnose;
pub(crate) mod show;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

pub(crate) fn parse_output_format(raw: &str) -> OutputFormat {
    match raw {
        "text" => OutputFormat::Text,
        "json" => OutputFormat::Json,
        other => {
            eprintln!("Unknown output format: {other}. Use 'text' or 'json'.");
            std::process::exit(1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Plant,
    Recognizer,
    Observer,
}

pub(crate) fn parse_stage(raw: &str) -> Stage {
    match raw {
        "plant" => Stage::Plant,
        "recognizer" | "recogniser" => Stage::Recognizer,
        "observer" => Stage::Observer,
        other => {
            eprintln!("Unknown stage: {other}. Use 'plant', 'recognizer', or 'observer'.");
            std::process::exit(1);
        }
    }
}
