pub const MAX_AGENT_IDS_PER_SERVICE: usize = 16;
pub const MAX_AGENT_INSTANCES_PER_SERVICE: usize = 32;
pub const MAX_CONFIG_HASHES_PER_SERVICE: usize = 32;
pub const MAX_MULTISIG_IMPLEMENTATIONS: usize = 8;

pub const REGISTRY_WALLET_SEED: &[u8] = b"registry_wallet";
pub const SERVICE_SEED: &[u8] = b"service";
/// Seed of agent accounts in the external agent registry program.
pub const AGENT_SEED: &[u8] = b"agent";

pub const DISCRIMINATOR_SIZE: usize = 8;
pub const VEC_PREFIX_SIZE: usize = 4;
pub const PUBKEY_SIZE: usize = 32;
pub const HASH_SIZE: usize = 32;
pub const U128_SIZE: usize = 16;
pub const U64_SIZE: usize = 8;
pub const U32_SIZE: usize = 4;
pub const BOOL_SIZE: usize = 1;
pub const U8_SIZE: usize = 1;
pub const OPTION_TAG_SIZE: usize = 1;
pub const ENUM_TAG_SIZE: usize = 1;
