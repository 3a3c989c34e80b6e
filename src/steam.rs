//! Steam community id handling and the public-profile probe.

/// A 64-bit Steam community id.
///
/// Bit layout, low to high: account number (32 bits), instance (20 bits),
/// account type (4 bits), universe (8 bits). A regular public-universe
/// individual account has universe 1, account type 1 and instance 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SteamId(u64);

/// Instance value of a regular desktop account.
pub const DESKTOP_INSTANCE: u32 = 1;

const INSTANCE_SHIFT: u32 = 32;
const INSTANCE_MASK: u64 = 0xF_FFFF;

impl SteamId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub const fn account_number(self) -> u32 {
        self.0 as u32
    }

    pub const fn instance(self) -> u32 {
        ((self.0 >> INSTANCE_SHIFT) & INSTANCE_MASK) as u32
    }

    pub const fn account_type(self) -> u8 {
        ((self.0 >> 52) & 0xF) as u8
    }

    pub const fn universe(self) -> u8 {
        (self.0 >> 56) as u8
    }

    /// Replace the instance bits. Connection ids coming out of Discord do not
    /// always carry an instance, so forcing [`DESKTOP_INSTANCE`] yields the
    /// canonical community id.
    pub const fn with_instance(self, instance: u32) -> Self {
        Self((self.0 & !(INSTANCE_MASK << INSTANCE_SHIFT)) | ((instance as u64 & INSTANCE_MASK) << INSTANCE_SHIFT))
    }
}

impl std::str::FromStr for SteamId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl std::fmt::Display for SteamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

const PRIVACY_MARKER: &str = "<privacyMessage>";

/// Client for the unauthenticated Steam community profile endpoint. No
/// credentials are ever sent to Steam.
#[derive(Debug)]
pub struct Steam {
    client: reqwest::Client,
    base: String,
}

impl Steam {
    pub fn new(config: &crate::config::Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: config.steam_base.clone(),
        }
    }

    pub fn profile_url(&self, id: SteamId) -> String {
        format!("{}/profiles/{id}", self.base)
    }

    /// Fetch the profile XML and require it to be visible. A non-success
    /// status and a privacy message both read as the same failure, because
    /// either way the profile cannot be verified.
    pub async fn verify_public_profile(&self, id: SteamId) -> ::anyhow::Result<()> {
        let response = self
            .client
            .get(self.profile_url(id))
            .query(&[("xml", "1")])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(::anyhow::format_err!("Invalid Steam response"));
        }
        let body = response.text().await?;
        if body.contains(PRIVACY_MARKER) {
            return Err(::anyhow::format_err!("Invalid Steam response"));
        }
        Ok(())
    }
}
