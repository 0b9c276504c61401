use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use metastrip::batch::{CleanupEvent, collect_candidate_files, run_cleanup_with_sender};
use metastrip::{CleanError, classify, clean};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if env::args().len() > 1 {
        eprintln!(
            "Metastrip es interactivo y no acepta argumentos. Ejecuta solo `cargo run` o el binario sin parámetros."
        );
        std::process::exit(1);
    }

    render_header();

    println!(
        "{}",
        style("Escribe la ruta de un archivo o directorio para eliminar su metadata.").dim()
    );
    println!(
        "{}\n",
        style("Escribe 'salir' o 'exit' para terminar.").dim()
    );

    let mut input = String::new();
    loop {
        match read_user_input(&mut input) {
            Ok(None) => {
                println!("\n{}", style("Fin de la entrada. ¡Hasta luego!").dim());
                break;
            }
            Ok(Some(line)) => {
                if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("salir") {
                    println!("{}", style("Hasta luego!").dim());
                    break;
                }

                if line.is_empty() {
                    continue;
                }

                let path = Path::new(&line);
                if path.is_dir() {
                    clean_directory(path);
                } else {
                    clean_single_file(path);
                }
            }
            Err(error) => {
                eprintln!("Error al leer la entrada: {error}");
            }
        }
    }
}

fn render_header() {
    let width = 66;
    let border = "═".repeat(width - 2);
    println!("{}", style(format!("╔{}╗", border)).cyan().bold());
    println!(
        "{}",
        style(format!(
            "║ {:^inner_width$} ║",
            "Metastrip | Limpieza de metadata",
            inner_width = width - 4
        ))
        .cyan()
        .bold()
    );
    println!("{}\n", style(format!("╚{}╝", border)).cyan().bold());
}

fn read_user_input(buffer: &mut String) -> io::Result<Option<String>> {
    print!("{} ", style("Ruta").bold().cyan());
    print!("{} ", style("›").cyan());
    io::stdout().flush()?;

    buffer.clear();
    let bytes_read = io::stdin().read_line(buffer)?;
    if bytes_read == 0 {
        return Ok(None);
    }

    Ok(Some(buffer.trim().to_string()))
}

fn clean_single_file(path: &Path) {
    let tag = classify(path);
    println!(
        "{} {}",
        style("│ Formato detectado:").cyan(),
        style(tag.label()).bold()
    );

    match clean(path) {
        Ok(()) => println!(
            "{}\n",
            style(format!("│ ✓ Metadata eliminada: {}", path.display())).green()
        ),
        Err(error) => report_failure(path, &error),
    }
}

fn report_failure(path: &Path, error: &CleanError) {
    if error.original_preserved() {
        println!(
            "{}",
            style(format!("│ ✗ No se pudo limpiar {}", path.display())).red()
        );
        println!("{}", style(format!("│   {error}")).dim());
        println!("{}\n", style("│   El archivo original no se modificó.").dim());
    } else {
        println!(
            "{}",
            style(format!("│ ✗ {} requiere recuperación manual", path.display()))
                .red()
                .bold()
        );
        println!("{}\n", style(format!("│   {error}")).red());
    }
}

fn clean_directory(root: &Path) {
    let recursive = ask_yes_no("¿Incluir subdirectorios?");
    let files = match collect_candidate_files(root, recursive) {
        Ok(files) => files,
        Err(message) => {
            eprintln!("{}", style(message).red());
            return;
        }
    };

    if files.is_empty() {
        println!(
            "{}\n",
            style("│ No hay archivos con un formato soportado en el directorio.").yellow()
        );
        return;
    }

    let (sender, receiver) = mpsc::channel();
    let worker = thread::spawn(move || run_cleanup_with_sender(files, sender));

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );

    let mut failures = Vec::new();
    for event in receiver.iter() {
        match event {
            CleanupEvent::Started { total } => progress.set_length(total as u64),
            CleanupEvent::Processing { index, path, .. } => {
                progress.set_position(index.saturating_sub(1) as u64);
                progress.set_message(file_name_of(&path));
            }
            CleanupEvent::Success { .. } => progress.inc(1),
            CleanupEvent::Failure {
                path,
                error,
                original_preserved,
            } => {
                progress.inc(1);
                failures.push((path, error, original_preserved));
            }
            CleanupEvent::Finished { .. } => break,
        }
    }
    progress.finish_and_clear();

    let summary = match worker.join() {
        Ok(summary) => summary,
        Err(_) => {
            eprintln!("{}", style("La limpieza por lote se interrumpió").red());
            return;
        }
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Archivo").add_attribute(Attribute::Bold).fg(Color::Cyan),
            Cell::new("Resultado").add_attribute(Attribute::Bold).fg(Color::Cyan),
        ]);
    for (path, error, original_preserved) in &failures {
        let (label, color) = if *original_preserved {
            (format!("Sin cambios: {error}"), Color::Yellow)
        } else {
            (format!("Recuperación manual: {error}"), Color::Red)
        };
        table.add_row(vec![
            Cell::new(path.display().to_string()),
            Cell::new(label).fg(color),
        ]);
    }

    println!(
        "{}",
        style(format!(
            "│ Limpiados: {}  ·  Fallidos: {}",
            summary.successes, summary.failures
        ))
        .cyan()
        .bold()
    );
    if !failures.is_empty() {
        println!("{table}");
    }
    if summary.unrecovered > 0 {
        println!(
            "{}",
            style(format!(
                "│ {} archivo(s) requieren recuperación manual desde su copia .bak",
                summary.unrecovered
            ))
            .red()
            .bold()
        );
    }
    println!();
}

fn ask_yes_no(question: &str) -> bool {
    print!("{} ", style(format!("│ {question} [s/N] ▸")).cyan());
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes")
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
