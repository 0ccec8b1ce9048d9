use crate::types::Player;
use anyhow::{Context, Result};
use std::io::Write;

/// Destination for players produced by an import pass
pub trait PlayerSink {
    fn accept(&mut self, player: Player) -> Result<()>;
}

impl PlayerSink for Vec<Player> {
    fn accept(&mut self, player: Player) -> Result<()> {
        self.push(player);
        Ok(())
    }
}

/// Serialization format for `PlayerWriter`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One compact JSON object per line
    #[default]
    JsonLines,
    /// A single pretty-printed JSON array
    Json,
}

/// Writes players to any `Write` as they are produced
pub struct PlayerWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    written: usize,
}

impl<W: Write> PlayerWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        PlayerWriter {
            writer,
            format,
            written: 0,
        }
    }

    pub fn write_player(&mut self, player: &Player) -> Result<()> {
        match self.format {
            OutputFormat::JsonLines => {
                let json = serde_json::to_string(player).context("Failed to serialize player")?;
                writeln!(self.writer, "{}", json).context("Failed to write player")?;
            }
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(player).context("Failed to serialize player")?;
                let sep = if self.written == 0 { "[\n" } else { ",\n" };
                write!(self.writer, "{}{}", sep, indent(&json)).context("Failed to write player")?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Number of players written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Close the array (for `Json`) and flush
    pub fn finish(mut self) -> Result<W> {
        if self.format == OutputFormat::Json {
            let tail = if self.written == 0 { "[]\n" } else { "\n]\n" };
            self.writer
                .write_all(tail.as_bytes())
                .context("Failed to write player")?;
        }
        self.writer.flush().context("Failed to flush writer")?;
        Ok(self.writer)
    }
}

impl<W: Write> PlayerSink for PlayerWriter<W> {
    fn accept(&mut self, player: Player) -> Result<()> {
        self.write_player(&player)
    }
}

fn indent(json: &str) -> String {
    json.lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(asset_id: i64) -> Player {
        Player {
            asset_id,
            name: asset_id.to_string(),
            rating: 80,
            loyalty_bonus: true,
            team: "5".to_string(),
            league: "of_team_5".to_string(),
            nation: "52".to_string(),
            position: "CM".to_string(),
        }
    }

    #[test]
    fn test_json_lines() {
        let mut writer = PlayerWriter::new(Vec::new(), OutputFormat::JsonLines);
        writer.write_player(&player(1)).unwrap();
        writer.write_player(&player(2)).unwrap();
        assert_eq!(writer.written(), 2);

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Player = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, player(1));
    }

    #[test]
    fn test_json_array() {
        let mut writer = PlayerWriter::new(Vec::new(), OutputFormat::Json);
        writer.accept(player(1)).unwrap();
        writer.accept(player(2)).unwrap();

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        let players: Vec<Player> = serde_json::from_str(&output).unwrap();
        assert_eq!(players, vec![player(1), player(2)]);
    }

    #[test]
    fn test_empty_json_array() {
        let writer = PlayerWriter::new(Vec::new(), OutputFormat::Json);
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(output.trim(), "[]");
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<Player> = Vec::new();
        sink.accept(player(3)).unwrap();
        assert_eq!(sink, vec![player(3)]);
    }
}
