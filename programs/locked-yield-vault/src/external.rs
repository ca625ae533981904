use anchor_lang::prelude::*;
use solana_sha256_hasher::hash;

use crate::errors::VaultError;

// Instruction names exposed by the conversion service and the reward pool.
// Both follow the Anchor convention: sha256("global:<name>")[..8] + borsh args.
pub const CONVERT_IX: &str = "convert";
pub const STAKE_IX: &str = "stake";
pub const WITHDRAW_IX: &str = "withdraw";
pub const GET_REWARD_IX: &str = "get_reward";

// Account type name of the pool's state, discriminated as sha256("account:<name>")[..8]
pub const REWARD_POOL_ACCOUNT: &str = "RewardPool";

pub fn sighash(name: &str) -> [u8; 8] {
    discriminator("global", name)
}

pub fn account_discriminator(name: &str) -> [u8; 8] {
    discriminator("account", name)
}

fn discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{namespace}:{name}");
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    discriminator
}

/// Instruction data builder, little-endian like borsh
pub struct IxData(Vec<u8>);

impl IxData {
    pub fn new(name: &str) -> Self {
        Self(sighash(name).to_vec())
    }

    pub fn u64(mut self, value: u64) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn bool(mut self, value: bool) -> Self {
        self.0.push(value as u8);
        self
    }

    /// Legacy pools take no selector, so `None` writes nothing
    pub fn pool_id(self, pool_id: Option<u64>) -> Self {
        match pool_id {
            Some(pid) => self.u64(pid),
            None => self,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

// EXTERNAL state, belonging to the reward pool program
#[derive(Clone, Debug, AnchorDeserialize, AnchorSerialize, PartialEq)]
pub struct RewardPoolState {
    pub discriminator: [u8; 8],

    /// token accepted by `stake`
    pub staking_mint: Pubkey,

    /// token paid by `get_reward`
    pub reward_mint: Pubkey,
}

/// deserialize reward pool state: &AccountInfo
pub fn deserialize_reward_pool(reward_pool: &AccountInfo) -> Result<RewardPoolState> {
    let data = reward_pool.try_borrow_data()?;
    let mut data_slice = &data[..];
    let state = RewardPoolState::deserialize(&mut data_slice)
        .map_err(|_err| error!(VaultError::InvalidPool))?;
    // other accounts owned by the pool program share its owner but not this tag
    require!(
        state.discriminator == account_discriminator(REWARD_POOL_ACCOUNT),
        VaultError::InvalidPool
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sighash_matches_anchor_discriminator() {
        let expected = hash(b"global:stake").to_bytes();
        assert_eq!(sighash(STAKE_IX), expected[..8]);
        assert_ne!(sighash(STAKE_IX), sighash(WITHDRAW_IX));
    }

    #[test]
    fn test_legacy_layout_omits_pool_id() {
        let legacy = IxData::new(STAKE_IX).pool_id(None).u64(10).into_bytes();
        let selected = IxData::new(STAKE_IX).pool_id(Some(170)).u64(10).into_bytes();

        assert_eq!(legacy.len(), 16);
        assert_eq!(selected.len(), 24);
        assert_eq!(&selected[8..16], &170u64.to_le_bytes());
        assert_eq!(&selected[16..], &legacy[8..]);
    }

    #[test]
    fn test_convert_layout() {
        let data = IxData::new(CONVERT_IX).u64(5).bool(true).into_bytes();
        assert_eq!(data.len(), 17);
        assert_eq!(data[16], 1);
    }

    #[test]
    fn test_reward_pool_state_roundtrip() {
        let state = RewardPoolState {
            discriminator: account_discriminator(REWARD_POOL_ACCOUNT),
            staking_mint: Pubkey::new_unique(),
            reward_mint: Pubkey::new_unique(),
        };
        let mut bytes = Vec::new();
        state.serialize(&mut bytes).unwrap();
        // trailing pool fields are ignored
        bytes.extend_from_slice(&[0u8; 64]);

        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 0u64;
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut bytes, &owner, false, 0);

        assert_eq!(deserialize_reward_pool(&info).unwrap(), state);
    }

    #[test]
    fn test_reward_pool_state_too_short() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 0u64;
        let mut bytes = vec![0u8; 20];
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut bytes, &owner, false, 0);

        assert_eq!(
            deserialize_reward_pool(&info).unwrap_err(),
            VaultError::InvalidPool.into()
        );
    }

    #[test]
    fn test_foreign_pool_account_rejected() {
        // matching mints, but a different account type of the pool program
        let state = RewardPoolState {
            discriminator: account_discriminator("UserStake"),
            staking_mint: Pubkey::new_unique(),
            reward_mint: Pubkey::new_unique(),
        };
        let mut bytes = Vec::new();
        state.serialize(&mut bytes).unwrap();

        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 0u64;
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut bytes, &owner, false, 0);

        assert_eq!(
            deserialize_reward_pool(&info).unwrap_err(),
            VaultError::InvalidPool.into()
        );
    }

    #[test]
    fn test_account_and_instruction_namespaces_differ() {
        assert_eq!(
            account_discriminator(REWARD_POOL_ACCOUNT),
            hash(b"account:RewardPool").to_bytes()[..8]
        );
        assert_ne!(account_discriminator(STAKE_IX), sighash(STAKE_IX));
    }
}
