//! Common test utilities and fixture helpers.

use std::collections::VecDeque;
use std::path::PathBuf;

use roadroute_lib::{load_road_network, Channel, LineEvent, RoadNetwork, Result};

/// Path to fixtures directory used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Three vertices one degree apart: 1 -> 2 -> 3.
#[allow(dead_code)]
pub fn triangle_network() -> RoadNetwork {
    load_road_network(&fixtures_dir().join("triangle_roads.txt")).expect("triangle fixture loads")
}

/// Quarter-degree grid with parallel edges, a self loop and an isolated vertex.
#[allow(dead_code)]
pub fn small_city_network() -> RoadNetwork {
    load_road_network(&fixtures_dir().join("small_city_roads.txt"))
        .expect("small city fixture loads")
}

/// Channel that replays scripted input events and records every written line.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct ScriptedChannel {
    input: VecDeque<LineEvent>,
    pub written: Vec<String>,
}

#[allow(dead_code)]
impl ScriptedChannel {
    pub fn new(input: impl IntoIterator<Item = LineEvent>) -> Self {
        Self {
            input: input.into_iter().collect(),
            written: Vec::new(),
        }
    }

    /// Script made only of lines.
    pub fn lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|line| LineEvent::line(*line)))
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Channel for ScriptedChannel {
    fn read_line(&mut self) -> Result<LineEvent> {
        Ok(self.input.pop_front().unwrap_or(LineEvent::Closed))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.written.push(line.to_string());
        Ok(())
    }
}
