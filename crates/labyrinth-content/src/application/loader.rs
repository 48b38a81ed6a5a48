//! Campaign loading from YAML source.

use std::fmt::Write as _;
use std::path::Path;

use labyrinth_core::error::DomainError;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::domain::campaign::Campaign;

/// A parsed and validated campaign.
#[derive(Debug, Clone)]
pub struct LoadedCampaign {
    /// The campaign records.
    pub campaign: Campaign,
    /// Hex SHA-256 of the source text.
    pub fingerprint: String,
    /// Configuration gaps the orchestrator will degrade around.
    pub warnings: Vec<String>,
}

/// Parses and validates a campaign from YAML text.
///
/// # Errors
///
/// Returns `DomainError::Configuration` if the YAML does not parse or the
/// campaign fails validation.
pub fn load_campaign_from_str(source: &str) -> Result<LoadedCampaign, DomainError> {
    let campaign: Campaign = serde_yaml::from_str(source)
        .map_err(|e| DomainError::Configuration(format!("campaign parse failed: {e}")))?;
    let warnings = campaign.validate()?;
    for warning in &warnings {
        warn!(%warning, "campaign configuration gap");
    }
    let fingerprint = fingerprint(source);
    info!(
        title = %campaign.title,
        chapters = campaign.chapters.len(),
        questions = campaign.questions.len(),
        %fingerprint,
        "campaign loaded"
    );
    Ok(LoadedCampaign {
        campaign,
        fingerprint,
        warnings,
    })
}

/// Reads and loads a campaign file.
///
/// # Errors
///
/// Returns `DomainError::Configuration` if the file cannot be read or the
/// campaign is invalid.
pub fn load_campaign_from_path(path: &Path) -> Result<LoadedCampaign, DomainError> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        DomainError::Configuration(format!("cannot read campaign {}: {e}", path.display()))
    })?;
    load_campaign_from_str(&source)
}

fn fingerprint(source: &str) -> String {
    let digest = Sha256::digest(source.as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut hex, byte| {
        let _ = write!(hex, "{byte:02x}");
        hex
    })
}

#[cfg(test)]
mod tests {
    use labyrinth_core::error::DomainError;

    use super::*;
    use crate::domain::records::{Activation, QuestionKind, TriggerKind};

    const SOURCE: &str = r"
title: Test Labyrinth
settings:
  max_lives: 5
books:
  - id: book-1
    title: The First Book
    order: 1
questions:
  - id: q-chest
    text: What opens a chest?
    answers: [A key, A song, A stone]
    correct_index: 0
    kind: chest
    feedback:
      correct: The lid creaks open.
      wrong: Nothing happens.
chapters:
  - number: 1
    title: Entrance
    intro_dialogue: [Welcome, Find the book]
    triggers:
      - id: chest-1
        kind: chest
        question: q-chest
        reward: book-1
        activation: interact
        viewpoint:
          position: { x: 1.0, y: 2.0, z: 3.0 }
          yaw: 90.0
";

    #[test]
    fn test_load_campaign_parses_records_and_defaults() {
        // Act
        let loaded = load_campaign_from_str(SOURCE).unwrap();

        // Assert
        let campaign = &loaded.campaign;
        assert_eq!(campaign.title, "Test Labyrinth");
        assert_eq!(campaign.settings.max_lives, 5);
        assert_eq!(campaign.settings.damage_per_wrong_answer, 1);
        assert_eq!(campaign.question("q-chest").unwrap().kind, QuestionKind::Chest);

        let chapter = campaign.chapter(1).unwrap();
        assert_eq!(chapter.intro_dialogue.len(), 2);
        let chest = &chapter.triggers[0];
        assert_eq!(chest.kind, TriggerKind::Chest);
        assert_eq!(chest.activation(), Activation::Interact);
        assert!((chest.viewpoint.unwrap().yaw - 90.0).abs() < f32::EPSILON);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_fingerprint_is_stable_hex_sha256() {
        let first = load_campaign_from_str(SOURCE).unwrap();
        let second = load_campaign_from_str(SOURCE).unwrap();

        assert_eq!(first.fingerprint, second.fingerprint);
        assert_eq!(first.fingerprint.len(), 64);
        assert!(first.fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_malformed_yaml_is_configuration_error() {
        let result = load_campaign_from_str("chapters: [");

        match result.unwrap_err() {
            DomainError::Configuration(msg) => assert!(msg.starts_with("campaign parse failed")),
            other => panic!("expected Configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let result = load_campaign_from_path(Path::new("/nonexistent/campaign.yaml"));

        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }
}
