//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::alerts::{AlertLevel, VitalAlert};
use crate::cli::args::OutputFormat;
use crate::domain::{Profile, ThresholdSettings, VitalKind, VitalReading};
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Profile list entry for display
#[derive(Debug, Clone, Serialize)]
pub struct ProfileListEntry {
    pub id: String,
    pub name: String,
    pub device_id: String,
    pub status: String,
    pub location: String,
}

impl From<&Profile> for ProfileListEntry {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.display_name(),
            device_id: profile.device_id.clone(),
            status: profile.status.to_string(),
            location: profile.location.clone(),
        }
    }
}

impl TableDisplay for ProfileListEntry {
    fn to_table(&self) -> String {
        format!(
            "  {:<4} {:<20} {:<19} {:<9} {}",
            self.id, self.name, self.device_id, self.status, self.location
        )
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.id, self.name)
    }
}

/// Profile list for display
#[derive(Debug, Clone, Serialize)]
pub struct ProfileList {
    pub profiles: Vec<ProfileListEntry>,
}

impl TableDisplay for ProfileList {
    fn to_table(&self) -> String {
        let mut output = format!("Profiles: {}\n\n", self.profiles.len());

        if self.profiles.is_empty() {
            output.push_str("  No profiles configured\n");
            return output;
        }

        output.push_str("  ID   Name                 Device              Status    Location\n");
        output.push_str("  ────────────────────────────────────────────────────────────────────\n");

        for profile in &self.profiles {
            output.push_str(&profile.to_table());
            output.push('\n');
        }

        output
    }

    fn to_compact(&self) -> String {
        self.profiles
            .iter()
            .map(|p| p.to_compact())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Full profile display
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDetail {
    #[serde(flatten)]
    pub profile: Profile,
}

impl TableDisplay for ProfileDetail {
    fn to_table(&self) -> String {
        let p = &self.profile;
        let mut output = format!("[{}] {}\n", p.id, p.display_name());
        output.push_str(&format!("  Status:   {}\n", p.status));
        output.push_str(&format!("  Age:      {}\n", p.age));
        output.push_str(&format!("  Gender:   {}\n", p.gender));
        output.push_str(&format!("  Location: {}\n", p.location));
        output.push_str(&format!("  Device:   {}\n", p.device_id));

        let optional = [
            ("Blood group", &p.blood_group),
            ("Contact", &p.contact_info),
            ("Phone", &p.contact_number),
            ("Monitor until", &p.monitoring_end_time),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                output.push_str(&format!("  {:<9} {}\n", format!("{}:", label), value));
            }
        }

        output
    }

    fn to_compact(&self) -> String {
        format!(
            "{}:{} {} {}",
            self.profile.id,
            self.profile.display_name(),
            self.profile.device_id,
            self.profile.status
        )
    }
}

/// One row of the threshold table
#[derive(Debug, Clone, Serialize)]
pub struct ThresholdRow {
    pub vital: String,
    pub min: f64,
    pub max: f64,
    pub buffer: f64,
    pub unit: String,
}

/// Threshold table display
#[derive(Debug, Clone, Serialize)]
pub struct ThresholdTable {
    pub thresholds: Vec<ThresholdRow>,
}

impl From<&ThresholdSettings> for ThresholdTable {
    fn from(settings: &ThresholdSettings) -> Self {
        let thresholds = VitalKind::ALL
            .into_iter()
            .map(|kind| {
                let range = settings.get(kind);
                ThresholdRow {
                    vital: kind.to_string(),
                    min: range.min(),
                    max: range.max(),
                    buffer: kind.buffer(),
                    unit: kind.unit().trim().to_string(),
                }
            })
            .collect();

        Self { thresholds }
    }
}

impl TableDisplay for ThresholdTable {
    fn to_table(&self) -> String {
        let mut output = String::from("Thresholds:\n");

        for row in &self.thresholds {
            output.push_str(&format!(
                "  {:<17} {}-{} {} (buffer ±{})\n",
                row.vital, row.min, row.max, row.unit, row.buffer
            ));
        }

        output
    }

    fn to_compact(&self) -> String {
        self.thresholds
            .iter()
            .map(|r| format!("{}={}-{}", r.vital, r.min, r.max))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Result of classifying one pair of vitals
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub heart_rate: f64,
    pub body_temperature: f64,
    pub level: AlertLevel,
    pub alert: Option<VitalAlert>,
}

impl TableDisplay for Classification {
    fn to_table(&self) -> String {
        let mut output = format!(
            "Heart rate: {} bpm, Body temperature: {}°F\n  Level: {}\n",
            self.heart_rate, self.body_temperature, self.level
        );

        if let Some(alert) = &self.alert {
            output.push_str(&format!("  Alert: {}\n", alert));
        }

        output
    }

    fn to_compact(&self) -> String {
        format!(
            "{} (hr={} temp={})",
            self.level, self.heart_rate, self.body_temperature
        )
    }
}

/// A reading together with its classification
#[derive(Debug, Clone, Serialize)]
pub struct ReadingEntry {
    #[serde(flatten)]
    pub reading: VitalReading,
    pub level: AlertLevel,
}

impl TableDisplay for ReadingEntry {
    fn to_table(&self) -> String {
        format!(
            "  {}  {:>6.1} bpm  {:>6.1}°F  {}",
            self.reading.timestamp().format("%Y-%m-%d %H:%M:%S"),
            self.reading.heart_rate(),
            self.reading.body_temperature(),
            self.level
        )
    }

    fn to_compact(&self) -> String {
        format!(
            "{} hr={} temp={} {}",
            self.reading.timestamp().format("%H:%M:%S"),
            self.reading.heart_rate(),
            self.reading.body_temperature(),
            self.level
        )
    }
}

/// Reading history display
#[derive(Debug, Clone, Serialize)]
pub struct HistoryOutput {
    pub profile_id: String,
    pub name: String,
    pub readings: Vec<ReadingEntry>,
}

impl TableDisplay for HistoryOutput {
    fn to_table(&self) -> String {
        let mut output = format!(
            "[{}] {} ({} readings)\n\n",
            self.profile_id,
            self.name,
            self.readings.len()
        );

        if self.readings.is_empty() {
            output.push_str("  No readings available\n");
            return output;
        }

        output.push_str("  Time                 Heart rate  Temperature  Level\n");
        output.push_str("  ──────────────────────────────────────────────────────\n");

        for entry in &self.readings {
            output.push_str(&entry.to_table());
            output.push('\n');
        }

        output
    }

    fn to_compact(&self) -> String {
        let levels: Vec<String> = self.readings.iter().map(|r| r.level.to_string()).collect();
        format!("{}: {}", self.profile_id, levels.join(","))
    }
}

/// Summary printed after a replay
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub profile_id: String,
    pub name: String,
    pub readings: Vec<ReadingEntry>,
    pub alerts: Vec<VitalAlert>,
    pub final_level: AlertLevel,
}

impl TableDisplay for ReplaySummary {
    fn to_table(&self) -> String {
        let mut output = format!(
            "[{}] {}: replayed {} readings\n\n",
            self.profile_id,
            self.name,
            self.readings.len()
        );

        for entry in &self.readings {
            output.push_str(&entry.to_table());
            output.push('\n');
        }

        output.push_str(&format!("\n  Notifications: {}\n", self.alerts.len()));
        for alert in &self.alerts {
            output.push_str(&format!("    • {}\n", alert));
        }

        output.push_str(&format!("  Final level: {}\n", self.final_level));
        output
    }

    fn to_compact(&self) -> String {
        format!(
            "{}: {} readings, {} notifications, final {}",
            self.profile_id,
            self.readings.len(),
            self.alerts.len(),
            self.final_level
        )
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProfileStatus;
    use crate::mock::profile;

    #[test]
    fn test_profile_entry_table() {
        let jane = profile(
            "2",
            "Jane",
            "Smith",
            "AA:BB:CC:DD:EE:02",
            ProfileStatus::Active,
        );
        let entry = ProfileListEntry::from(&jane);

        let output = entry.to_table();
        assert!(output.contains("Jane Smith"));
        assert!(output.contains("AA:BB:CC:DD:EE:02"));
        assert_eq!(entry.to_compact(), "2:Jane Smith");
    }

    #[test]
    fn test_threshold_table_rows() {
        let table = ThresholdTable::from(&ThresholdSettings::default());
        assert_eq!(table.thresholds.len(), 2);
        assert_eq!(table.thresholds[0].buffer, 5.0);
        assert_eq!(table.thresholds[1].min, 97.0);
        assert!(table.to_table().contains("heart rate"));
    }

    #[test]
    fn test_classification_json() {
        let classification = Classification {
            heart_rate: 72.0,
            body_temperature: 98.2,
            level: AlertLevel::Normal,
            alert: None,
        };

        let json = serde_json::to_value(&classification).unwrap();
        assert_eq!(json["level"], "normal");
        assert!(json["alert"].is_null());
    }

    #[test]
    fn test_message_display() {
        let msg = Message {
            message: "Session ended".to_string(),
            success: true,
        };

        assert!(msg.to_table().starts_with('✓'));
    }
}
