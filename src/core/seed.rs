//! Demonstration data inserted on start-up when seeding is enabled.

use crate::core::model::SystemInput;
use crate::core::service::SystemService;
use crate::errors::Result;
use tracing::{info, instrument};

/// The demonstration systems, none associated with a specific local government.
#[must_use]
pub fn demo_systems() -> Vec<SystemInput> {
    vec![
        SystemInput::new("Resident Registry System", "juki-admin@chiyoda.tokyo.jp")
            .with_telephone("03-1234-5678")
            .with_remark("Manages the basic resident register"),
        SystemInput::new("Tax Management System", "zeimu-admin@chiyoda.tokyo.jp")
            .with_telephone("03-1234-5679")
            .with_remark("Tax administration workflows"),
        SystemInput::new("Health Management System", "kenkou-admin@yokohama.lg.jp")
            .with_telephone("045-1234-5678")
            .with_remark("Supports citizen health management"),
        SystemInput::new("Long-term Care Insurance System", "kaigo-admin@yokohama.lg.jp")
            .with_telephone("045-1234-5679")
            .with_remark("Long-term care insurance administration"),
        SystemInput::new("Education Information System", "kyoiku-admin@nagoya.lg.jp")
            .with_telephone("052-1234-5678")
            .with_remark("Education records management"),
        SystemInput::new("Common Platform System", "platform-admin@gov-cloud.go.jp")
            .with_telephone("03-0000-0000")
            .with_remark("Shared platform used across local governments"),
        SystemInput::new("Disaster Response System", "saigai-admin@osaka.lg.jp")
            .with_telephone("06-1234-5678")
            .with_remark("Coordinates disaster response"),
        SystemInput::new("Library Management System", "library-admin@chiyoda.tokyo.jp")
            .with_remark("Library holdings and lending"),
    ]
}

/// Inserts [`demo_systems`] when the table is empty. Returns how many were inserted.
///
/// # Errors
/// Returns an error if counting or any insert fails.
#[instrument(skip(service))]
pub async fn seed_systems(service: &SystemService) -> Result<usize> {
    let existing = service.count_systems().await?;
    if existing > 0 {
        info!("Skipping seed, {existing} systems already present.");
        return Ok(0);
    }

    let systems = demo_systems();
    let total = systems.len();
    for input in systems {
        let created = service.create_system(input).await?;
        info!(id = %created.id, name = %created.system_name, "Seeded system");
    }
    info!("Successfully seeded {total} systems.");
    Ok(total)
}
