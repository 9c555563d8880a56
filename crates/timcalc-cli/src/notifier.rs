//! CLI implementation of PassObserver

use std::io::Write;

use timcalc::{PassObserver, relaxation_notice};

/// Writes a notice each time the error margin is relaxed
pub struct CliNotifier<W: Write> {
    out: W,
}

impl<W: Write> CliNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> PassObserver for CliNotifier<W> {
    fn on_relaxed(&mut self, _pass: u32, tolerance: f64) {
        writeln!(self.out, "{}", relaxation_notice(tolerance)).ok();
        self.out.flush().ok();
    }
}
