//! Known Roblox service/member registry.
//!
//! Only [`ServiceRoot::services`] participates in validation (vetting `GetService` lookups).
//! Per-service members are kept for hosts that want completion or hover data.

/// A root namespace and the services reachable from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceRoot {
    /// Root global name (e.g. `"game"`).
    pub name: &'static str,
    /// Methods callable on the root.
    pub methods: &'static [&'static str],
    /// Child service names known to exist under the root.
    pub services: &'static [&'static str],
}

impl ServiceRoot {
    /// Returns `true` if `name` is an exact known service name.
    pub fn is_known_service(&self, name: &str) -> bool {
        self.services.contains(&name)
    }

    /// Known services that are a case-insensitive substring match of `name`, in either direction.
    ///
    /// A non-empty result marks `name` as a probable near-miss of a real service.
    pub fn fuzzy_matches(&self, name: &str) -> Vec<&'static str> {
        let needle = name.to_lowercase();
        self.services
            .iter()
            .copied()
            .filter(|service| {
                let service = service.to_lowercase();
                service.contains(&needle) || needle.contains(&service)
            })
            .collect()
    }
}

/// Members of a single service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Service name.
    pub name: &'static str,
    /// Known methods.
    pub methods: &'static [&'static str],
    /// Known properties.
    pub properties: &'static [&'static str],
    /// Known events.
    pub events: &'static [&'static str],
}

/// Registry roots.
pub const ROBLOX_ROOTS: &[ServiceRoot] = &[ServiceRoot {
    name: "game",
    methods: &[
        "GetService",
        "FindService",
        "GetChildren",
        "FindFirstChild",
        "WaitForChild",
    ],
    services: &[
        "Players",
        "Workspace",
        "ReplicatedStorage",
        "ServerStorage",
        "StarterGui",
        "StarterPack",
        "StarterPlayer",
        "Lighting",
        "SoundService",
        "TweenService",
        "RunService",
        "UserInputService",
        "ContextActionService",
        "GuiService",
        "MarketplaceService",
        "DataStoreService",
        "MessagingService",
        "TeleportService",
        "HttpService",
        "TextService",
        "Chat",
        "Teams",
        "PathfindingService",
        "CollectionService",
    ],
}];

/// Per-service member tables.
pub const ROBLOX_SERVICES: &[ServiceInfo] = &[
    ServiceInfo {
        name: "Players",
        methods: &["GetPlayers", "FindFirstChild", "GetChildren"],
        properties: &["LocalPlayer", "PlayerAdded", "PlayerRemoving"],
        events: &[
            "PlayerAdded",
            "PlayerRemoving",
            "CharacterAdded",
            "CharacterRemoving",
        ],
    },
    ServiceInfo {
        name: "Workspace",
        methods: &[
            "Raycast",
            "GetPartBoundsInBox",
            "GetPartBoundsInRegion3",
            "FindFirstChild",
            "GetChildren",
            "WaitForChild",
        ],
        properties: &["CurrentCamera", "Gravity", "FallenPartsDestroyHeight"],
        events: &["ChildAdded", "ChildRemoved"],
    },
    ServiceInfo {
        name: "UserInputService",
        methods: &[
            "IsKeyDown",
            "IsMouseButtonPressed",
            "GetMouseLocation",
            "GetGamepadState",
        ],
        properties: &[
            "TouchEnabled",
            "KeyboardEnabled",
            "MouseEnabled",
            "GamepadEnabled",
            "VREnabled",
        ],
        events: &["InputBegan", "InputChanged", "InputEnded", "KeyDown", "KeyUp"],
    },
    ServiceInfo {
        name: "RunService",
        methods: &["IsClient", "IsServer", "IsStudio"],
        properties: &[],
        events: &[
            "Heartbeat",
            "RenderStepped",
            "PreRender",
            "PostSimulation",
            "PreSimulation",
        ],
    },
    ServiceInfo {
        name: "TweenService",
        methods: &["Create", "GetValue"],
        properties: &[],
        events: &[],
    },
    ServiceInfo {
        name: "ReplicatedStorage",
        methods: &["FindFirstChild", "GetChildren", "WaitForChild"],
        properties: &[],
        events: &["ChildAdded", "ChildRemoved"],
    },
    ServiceInfo {
        name: "ServerStorage",
        methods: &["FindFirstChild", "GetChildren", "WaitForChild"],
        properties: &[],
        events: &["ChildAdded", "ChildRemoved"],
    },
    ServiceInfo {
        name: "StarterGui",
        methods: &[
            "SetCore",
            "GetCore",
            "SetCoreGuiEnabled",
            "GetCoreGuiEnabled",
        ],
        properties: &[],
        events: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> &'static ServiceRoot {
        &ROBLOX_ROOTS[0]
    }

    #[test]
    fn test_exact_service_lookup() {
        assert!(game().is_known_service("Players"));
        assert!(!game().is_known_service("players"));
        assert!(!game().is_known_service("Plyers"));
    }

    #[test]
    fn test_fuzzy_matches_both_directions() {
        // "Player" is contained in "Players".
        assert_eq!(
            game().fuzzy_matches("Player"),
            vec!["Players", "StarterPlayer"]
        );
        // "MyTweenServiceWrapper" contains "TweenService".
        assert_eq!(
            game().fuzzy_matches("MyTweenServiceWrapper"),
            vec!["TweenService"]
        );
        assert!(game().fuzzy_matches("Plyers").is_empty());
    }

    #[test]
    fn test_service_members() {
        let players = ROBLOX_SERVICES
            .iter()
            .find(|service| service.name == "Players")
            .unwrap();
        assert!(players.properties.contains(&"LocalPlayer"));
        assert!(players.methods.contains(&"GetPlayers"));
        assert!(!players.methods.contains(&"Raycast"));
        assert!(ROBLOX_SERVICES.iter().all(|service| service.name != "Chat"));
    }

    #[test]
    fn test_every_member_table_names_a_known_service() {
        for service in ROBLOX_SERVICES {
            assert!(
                game().is_known_service(service.name),
                "{} missing from root registry",
                service.name
            );
        }
    }
}
