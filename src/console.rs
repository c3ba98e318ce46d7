use courier::LogSink;

/// Leveled console writer the dedup sink feeds. Warnings and errors go to
/// stderr so piped output stays clean.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn log(&mut self, level: &str, line: &str) {
        match level {
            "error" => eprintln!("error  {line}"),
            "warn" => eprintln!("warn   {line}"),
            "debug" => println!("debug  {line}"),
            _ => println!("info   {line}"),
        }
    }
}
