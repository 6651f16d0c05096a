use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use rpl_core::utils::prelude::Error;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

pub(crate) fn print_parsing(text: &str) {
    print_colourful_prefix("Parsing", Color::Magenta, text)
}

pub(crate) fn print_running(text: &str) {
    print_colourful_prefix("Running", Color::Green, text)
}

pub(crate) fn print_finished(duration: Duration) {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_failed(duration: Duration) {
    print_colourful_prefix("Failed", Color::Red, &format!("after {}", seconds(duration)))
}

pub(crate) fn print_interrupted() {
    print_colourful_prefix("Interrupted", Color::Yellow, "by user")
}

pub(crate) fn print_warnings(count: usize) {
    if count > 0 {
        print_colourful_prefix("Warnings", Color::Yellow, &format!("{count} emitted"))
    }
}

fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    buffer
        .set_color(
            ColorSpec::new()
                .set_intense(true)
                .set_bold(true)
                .set_fg(Some(color)),
        )
        .expect("print_colourful_prefix");
    write!(buffer, "{prefix: >11}").expect("print_colourful_prefix");
    buffer
        .set_color(&ColorSpec::new())
        .expect("print_colourful_prefix");
    writeln!(buffer, " {text}").expect("print_colourful_prefix");
    buffer_writer.print(&buffer).expect("print_colourful_prefix");
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

// any non-empty FORCE_COLOR wins over terminal detection
fn colour_forced() -> bool {
    std::env::var("FORCE_COLOR").is_ok_and(|force| !force.is_empty())
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
pub(crate) fn print_error(err: &Error) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    err.pretty(&mut buffer);
    buffer_writer
        .print(&buffer)
        .expect("Writing error to stderr");
}
