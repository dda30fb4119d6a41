use std::{env, fs::read_to_string, path::PathBuf, process};

use num_traits::ToPrimitive;

use minilang::{
    analyzer::analyzer::analyze,
    display_error,
    generator::generator::generate,
    interpreter::{
        interpreter::{evaluate, PrintHandler},
        value::Value,
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    let (file_path, emit_java) = match args.as_slice() {
        [_, path] => (path.clone(), false),
        [_, path, flag] if flag == "--emit-java" => (path.clone(), true),
        [_, flag, path] if flag == "--emit-java" => (path.clone(), true),
        _ => {
            eprintln!("Usage: minilang <file> [--emit-java]");
            process::exit(2);
        }
    };

    let file_name = match file_path.rsplit('/').next() {
        Some(name) => String::from(name),
        None => file_path.clone(),
    };

    let file_contents = match read_to_string(&file_path) {
        Ok(contents) => contents,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            process::exit(1);
        }
    };

    let tokens = match tokenize(file_contents, Some(file_name)) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &PathBuf::from(&file_path));
            process::exit(1);
        }
    };

    let program = match parse(tokens) {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, &PathBuf::from(&file_path));
            process::exit(1);
        }
    };

    let analysis = match analyze(&program) {
        Ok(analysis) => analysis,
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    };

    if emit_java {
        let rendered = match generate(&program, &analysis) {
            Ok(rendered) => rendered,
            Err(error) => {
                eprintln!("Error: {}", error);
                process::exit(1);
            }
        };
        println!("{}", rendered);
        return;
    }

    let (result, _) = evaluate(&program, PrintHandler::Stdout);
    match result {
        Ok(Value::Integer(value)) => {
            // The program's result doubles as the process exit code.
            process::exit(value.to_i32().unwrap_or(1));
        }
        Ok(_) => {}
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}
