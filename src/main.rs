//! Command-line entry point. With no arguments it runs the benchmark; the
//! other commands expose single steps for spot checks.

use std::env;
use std::process::ExitCode;

use cipher_bench::config::config_from_env;
use cipher_bench::crypto::{decrypt_text, encrypt_text, key_length_bits, Algorithm};
use cipher_bench::orchestrator::run_benchmark;
use serde_json::json;

fn print_usage() {
    eprintln!("Commands:\n  run (default)\n  key-length <algorithm> <key>\n  encrypt <algorithm> <key> <plaintext>\n  decrypt <algorithm> <key> <ciphertext>\n  show-config\nAlgorithms: AES, DES, 3DES, RC4. Set CIPHER_BENCH_CONFIG to a JSON file to override the trial matrix.");
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn parse_algorithm(tag: &str) -> Option<Algorithm> {
    match tag.parse() {
        Ok(algorithm) => Some(algorithm),
        Err(err) => {
            log::error!("{err}");
            None
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str).unwrap_or("run") {
        "run" => {
            if args.len() > 2 {
                print_usage();
                return ExitCode::FAILURE;
            }
            let config = match config_from_env() {
                Ok(config) => config,
                Err(err) => {
                    log::error!("Test execution failed: {err}");
                    return ExitCode::FAILURE;
                }
            };
            log::info!("Encryption Performance Results:");
            match run_benchmark(&config) {
                Ok(summary) => {
                    log::info!(
                        "{} trials over {} records written to {}",
                        summary.rows.len(),
                        summary.records_loaded,
                        summary.output_path.display()
                    );
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    log::error!("Test execution failed: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        "key-length" => {
            if args.len() != 4 {
                print_usage();
                return ExitCode::FAILURE;
            }
            println!("{}", key_length_bits(&args[3], &args[2]));
            ExitCode::SUCCESS
        }
        "encrypt" => {
            if args.len() != 5 {
                print_usage();
                return ExitCode::FAILURE;
            }
            let Some(algorithm) = parse_algorithm(&args[2]) else {
                return ExitCode::FAILURE;
            };
            match encrypt_text(algorithm, &args[3], args[4].as_bytes()) {
                Ok(encoded) => {
                    println!("{encoded}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    log::error!("encryption failed: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        "decrypt" => {
            if args.len() != 5 {
                print_usage();
                return ExitCode::FAILURE;
            }
            let Some(algorithm) = parse_algorithm(&args[2]) else {
                return ExitCode::FAILURE;
            };
            match decrypt_text(algorithm, &args[3], &args[4]) {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(text) => {
                        println!("{text}");
                        ExitCode::SUCCESS
                    }
                    Err(err) => {
                        log::error!("decryption succeeded but UTF-8 failed: {err}");
                        ExitCode::FAILURE
                    }
                },
                Err(err) => {
                    log::error!("decryption failed: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        "show-config" => {
            let config = match config_from_env() {
                Ok(config) => config,
                Err(err) => {
                    log::error!("config load failed: {err}");
                    return ExitCode::FAILURE;
                }
            };
            let algorithms: Vec<_> = config
                .algorithms
                .iter()
                .map(|entry| {
                    json!({
                        "algorithm": entry.algorithm,
                        "keys": entry
                            .keys
                            .iter()
                            .map(|key| format!("<{} bytes>", key.len()))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
            let printable = json!({
                "inputPath": config.input_path,
                "outputPath": config.output_path,
                "batchSizes": config.batch_sizes,
                "algorithms": algorithms,
                "trials": config.trials().len(),
            });
            match serde_json::to_string_pretty(&printable) {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    log::error!("config rendering failed: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        _ => {
            print_usage();
            ExitCode::FAILURE
        }
    }
}
