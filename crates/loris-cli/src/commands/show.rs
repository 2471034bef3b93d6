// Command handler for: Show

use std::path::Path;

use loris_engine::observer::Observer;
use loris_engine::visualization::{observer_dot, render_observer_table, render_recognizer_table};
use loris_ir::reader;
use loris_ir::recognizer::Recognizer;

use super::Stage;

pub(crate) fn run_show_command(file: &Path, stage: Stage, dot: bool) -> miette::Result<()> {
    let plant = reader::read_file(file)?;
    match stage {
        Stage::Plant => println!("{plant}"),
        Stage::Recognizer => {
            let rec = Recognizer::build(&plant);
            print!("{}", render_recognizer_table(&rec, plant.alphabet()));
        }
        Stage::Observer => {
            let rec = Recognizer::build(&plant);
            let obs = Observer::build(&rec, plant.alphabet());
            if dot {
                print!("{}", observer_dot(&obs, &rec, plant.alphabet()));
            } else {
                print!("{}", render_observer_table(&obs, &rec, plant.alphabet()));
            }
        }
    }
    Ok(())
}
