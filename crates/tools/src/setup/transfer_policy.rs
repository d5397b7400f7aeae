use tracing::{debug, info, warn};

use super::{DayOneSetup, SetupError, SetupOutcome};
use crate::rpc::RemoteState;
use crate::tx::TransactionBuilder;

impl DayOneSetup<'_> {
    /// Append transfer policy creation unless the type already has a policy.
    ///
    /// The builder is touched only when the outcome is
    /// [`SetupOutcome::Created`]: policy creation followed by the transfer of
    /// its cap to the admin address.
    ///
    /// # Errors
    ///
    /// - `SetupError::Registry` if a required field is a placeholder; raised
    ///   before the remote query.
    /// - `SetupError::Remote` if the lookup fails. No retry is attempted and
    ///   nothing is appended.
    pub async fn create_transfer_policy<B, R>(
        &self,
        tx: &mut B,
        remote: &R,
    ) -> Result<SetupOutcome, SetupError>
    where
        B: TransactionBuilder + ?Sized,
        R: RemoteState + ?Sized,
    {
        let targets = self.targets()?;

        debug!(asset_type = %targets.asset_type, "looking up existing transfer policies");
        let existing = remote.transfer_policies(&targets.asset_type).await?;

        if !existing.is_empty() {
            warn!(
                asset_type = %targets.asset_type,
                existing = existing.len(),
                "type already has a transfer policy, skipping"
            );
            return Ok(SetupOutcome::Skipped {
                existing: existing.len(),
            });
        }

        let cap = tx.create_transfer_policy(&targets.asset_type, targets.publisher);
        tx.transfer_objects(&[cap], targets.admin);

        info!(
            network = %self.network(),
            asset_type = %targets.asset_type,
            admin = %targets.admin,
            "transfer policy creation appended"
        );
        Ok(SetupOutcome::Created)
    }
}
