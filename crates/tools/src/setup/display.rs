use tracing::{debug, info};

use super::{DayOneSetup, SetupError};
use crate::tx::TransactionBuilder;

/// Display template for the day-one NFT, in registration order
pub const DISPLAY_FIELDS: &[(&str, &str)] = &[
    ("name", "SuiNS Day 1 NFT #{serial}"),
    (
        "description",
        "The SuiNS Day 1 NFT represents community members who have been with SuiNS since day 1 of launch.",
    ),
    ("link", "https://suins.io/"),
    ("image_url", "https://suins.io/day_one_active_{active}.webp"),
];

impl DayOneSetup<'_> {
    /// Append display creation, version bump and the transfer to the admin.
    ///
    /// There is no existence check: calling this against a type that already
    /// has a display creates another one.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::Registry` if the package, publisher or admin
    /// address is still a placeholder. Nothing is appended in that case.
    pub fn create_display<B>(&self, tx: &mut B) -> Result<(), SetupError>
    where
        B: TransactionBuilder + ?Sized,
    {
        let targets = self.targets()?;

        // Each step consumes the handle produced by the one before it.
        let display = tx.create_display(&targets.asset_type, targets.publisher, DISPLAY_FIELDS);
        debug!(asset_type = %targets.asset_type, "appended display creation");
        tx.bump_display_version(display, &targets.asset_type);
        tx.transfer_objects(&[display], targets.admin);

        info!(
            network = %self.network(),
            asset_type = %targets.asset_type,
            admin = %targets.admin,
            "display registration appended"
        );
        Ok(())
    }
}
