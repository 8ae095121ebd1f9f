use colored::*;

pub fn print_header(text: &str) {
    println!("\n{}", text.bright_cyan().bold());
    println!("{}", "=".repeat(text.len()).bright_cyan());
}

pub fn print_success(text: &str) {
    println!("{}", text.green());
}

pub fn print_error(text: &str) {
    eprintln!("{}", text.red().bold());
}

pub fn print_info(text: &str) {
    println!("{}", text.blue());
}

pub fn print_prompt(text: &str) {
    print!("{}", text.yellow().bold());
}

/// Console preview of a generated report, truncated to `max_chars`.
pub fn print_report_preview(content: &str, max_chars: usize) {
    if content.chars().count() > max_chars {
        let preview: String = content.chars().take(max_chars).collect();
        println!("{}...", preview);
    } else {
        println!("{}", content);
    }
}
