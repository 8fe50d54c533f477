//! Challenge engine — issues, looks up, consumes, and purges one-time
//! challenges.

use rand::rngs::OsRng;
use rand::RngCore;
use tokengate_store::{Challenge, ChallengeStore, StoreError};
use tokengate_types::{GateParams, Identity, Timestamp};

/// Bytes of entropy behind the challenge id and the signed nonce.
const TOKEN_BYTES: usize = 16;

fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub struct ChallengeEngine;

impl ChallengeEngine {
    /// Issue a fresh challenge for `identity`, superseding any unused one.
    ///
    /// The message embeds the collection name, the requester identity, a
    /// random nonce, the issuance timestamp, and the chain id — so a signed
    /// challenge cannot be replayed for another project, another user, or
    /// another network.
    pub fn issue<S: ChallengeStore>(
        &self,
        store: &S,
        identity: &Identity,
        params: &GateParams,
        now: Timestamp,
    ) -> Result<Challenge, StoreError> {
        store.invalidate_for_identity(identity)?;

        let nonce = random_token();
        let message = format!(
            "{} NFT Verification\nUser: {}\nChallenge: {}\nTimestamp: {}\nNetwork: {}",
            params.project_name,
            identity,
            nonce,
            now.as_secs(),
            params.network.chain_id(),
        );

        let challenge = Challenge {
            id: random_token(),
            identity: identity.clone(),
            message,
            created_at: now,
            expires_at: now.plus_secs(params.challenge_expiry_secs),
            used: false,
        };
        store.put_challenge(&challenge)?;
        Ok(challenge)
    }

    /// Look up a challenge that is still consumable at `now`.
    ///
    /// Not-found, expired, and already-used are all `None` — callers get no
    /// way to probe which it was.
    pub fn find_usable<S: ChallengeStore>(
        &self,
        store: &S,
        id: &str,
        now: Timestamp,
    ) -> Result<Option<Challenge>, StoreError> {
        Ok(store.get_challenge(id)?.filter(|c| c.is_usable(now)))
    }

    /// Mark a challenge used, closing its replay window.
    pub fn consume<S: ChallengeStore>(&self, store: &S, id: &str) -> Result<(), StoreError> {
        store.mark_used(id)
    }

    /// Purge used and expired challenges. Returns how many were removed.
    pub fn cleanup<S: ChallengeStore>(&self, store: &S, now: Timestamp) -> Result<u64, StoreError> {
        store.purge_challenges(now)
    }
}
