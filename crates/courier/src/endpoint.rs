use std::env;

/// Default host for the log/event push service.
pub const DEFAULT_COLOSSUS_HOST: &str = "http://colossus.aws-us-east-1.foghorn.io";

/// Default public storefront host used by the login handshake URL.
pub const DEFAULT_PUBLIC_ENDPOINT: &str = "myfoghorn.com";

const STABLE_API_HOST: &str = "https://platform.foghorn.io";
const BETA_API_HOST: &str = "https://platform.beta.foghorn.io";

const ENV_TIER: &str = "FOGHORN_ENV";
const ENV_PUBLIC: &str = "FOGHORN_PUBLIC_ENDPOINT";

/// Global staging-vs-stable flag applied to tier-defaulted services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Stable,
    Beta,
}

impl Tier {
    pub fn from_flag(value: Option<&str>) -> Self {
        match value {
            Some(value) if value.eq_ignore_ascii_case("beta") => Self::Beta,
            _ => Self::Stable,
        }
    }

    fn api_host(self) -> &'static str {
        match self {
            Self::Stable => STABLE_API_HOST,
            Self::Beta => BETA_API_HOST,
        }
    }
}

/// Logical service names the resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Identity,
    Apps,
    Registry,
    Router,
    Workspaces,
    Colossus,
    Api,
}

impl Service {
    /// Case-insensitive lookup; unknown names fall back to the generic API.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "identity" => Self::Identity,
            "apps" => Self::Apps,
            "registry" => Self::Registry,
            "router" => Self::Router,
            "workspaces" => Self::Workspaces,
            "colossus" => Self::Colossus,
            _ => Self::Api,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Apps => "apps",
            Self::Registry => "registry",
            Self::Router => "router",
            Self::Workspaces => "workspaces",
            Self::Colossus => "colossus",
            Self::Api => "api",
        }
    }

    fn override_key(self) -> &'static str {
        match self {
            Self::Identity => "FOGHORN_IDENTITY_ENDPOINT",
            Self::Apps => "FOGHORN_APPS_ENDPOINT",
            Self::Registry => "FOGHORN_REGISTRY_ENDPOINT",
            Self::Router => "FOGHORN_ROUTER_ENDPOINT",
            Self::Workspaces => "FOGHORN_WORKSPACES_ENDPOINT",
            Self::Colossus => "FOGHORN_COLOSSUS_ENDPOINT",
            Self::Api => "FOGHORN_API_ENDPOINT",
        }
    }
}

const ALL_SERVICES: [Service; 7] = [
    Service::Identity,
    Service::Apps,
    Service::Registry,
    Service::Router,
    Service::Workspaces,
    Service::Colossus,
    Service::Api,
];

/// Explicit endpoint configuration, built once at process start and passed
/// by reference. Resolution never touches the environment after this.
#[derive(Debug, Clone)]
pub struct Endpoints {
    tier: Tier,
    public: String,
    overrides: [Option<String>; 7],
}

impl Endpoints {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` in tests without
    /// touching process-global state.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut overrides: [Option<String>; 7] = Default::default();
        for (slot, service) in overrides.iter_mut().zip(ALL_SERVICES) {
            *slot = lookup(service.override_key()).filter(|value| !value.trim().is_empty());
        }
        Self {
            tier: Tier::from_flag(lookup(ENV_TIER).as_deref()),
            public: lookup(ENV_PUBLIC)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PUBLIC_ENDPOINT.to_owned()),
            overrides,
        }
    }

    /// Resolve a service to its base URL. `None` means the service is
    /// disabled: no override and no fallback defined for that name.
    pub fn resolve(&self, service: Service) -> Option<&str> {
        let index = ALL_SERVICES
            .iter()
            .position(|candidate| *candidate == service)
            .unwrap_or(ALL_SERVICES.len() - 1);
        if let Some(explicit) = self.overrides[index].as_deref() {
            return Some(explicit);
        }
        match service {
            Service::Colossus => Some(DEFAULT_COLOSSUS_HOST),
            Service::Identity | Service::Api => Some(self.tier.api_host()),
            _ => None,
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn public_endpoint(&self) -> &str {
        &self.public
    }
}
