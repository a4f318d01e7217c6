//! Fixed response pools so every frontend draws from the same sponsor wisdom.
//!
//! Pools are compile-time constants. Nothing mutates them at runtime; the usage
//! history that drives non-repeating picks lives in [`crate::selector`].

/// One category button and the responses it can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPool {
    /// Stable key used by inbound calls (`"angry"`, `"stupid"`, ...).
    pub key: &'static str,
    /// Button caption shown by the terminal frontend.
    pub label: &'static str,
    pub responses: &'static [&'static str],
}

/// Category pools in display order.
pub const CATEGORY_POOLS: &[CategoryPool] = &[
    CategoryPool {
        key: "backfired",
        label: "It backfired",
        responses: &[
            "[Clutches pearls]",
            "Shocked. Party of none.",
            "Must be necessary.",
            "Well that's brand new behavior.",
            "Interesting.",
        ],
    },
    CategoryPool {
        key: "god",
        label: "God stuff",
        responses: &[
            "That's a fascinating turn of events.",
            "Interesting.",
            "I'm so shocked. How will I ever sleep?",
        ],
    },
    CategoryPool {
        key: "unwilling",
        label: "I don't want to",
        responses: &[
            "Do you think bottling it up is working for you?",
            "But also, you can keep bitching. No judgment.",
            "This medicine tastes like shit.",
            "Cool. What's different this time?",
            "Don't be a dumbass.",
        ],
    },
    CategoryPool {
        key: "okiwill",
        label: "OK, I will",
        responses: &[
            "Doubtful for 200, Alex.",
            "Honestly, I think you're full of shit. But also no judgment.",
        ],
    },
    CategoryPool {
        key: "whatdoido",
        label: "What do I do?",
        responses: &[
            "I know it won't work, but pray on it.",
            "You already know the answer.",
        ],
    },
    CategoryPool {
        key: "stupid",
        label: "I did something stupid",
        responses: &[
            "Don't be a dumbass.",
            "Is there a question in there?",
            "Maybe ride that wave a bit backwards.",
            "Are you asking for permission?",
        ],
    },
    CategoryPool {
        key: "angry",
        label: "I'm angry",
        responses: &[
            "Save your fucks for shit that matters.",
            "And?",
            "Interesting choice of focus.",
            "Your bottle of fucks is full.",
            "They did it your way before and you were still a bitch, so why bother?",
        ],
    },
];

/// Immediate answers for the panic button, emitted strictly in order.
pub const PANIC_RESPONSES: &[&str] = &[
    "Where are you with meetings?",
    "Have you called anyone today?",
    "Have you done your stepwork?",
];

/// Thought-bubble lines shown while the sponsor is "thinking".
pub const THOUGHTS: &[&str] = &[
    "Oh, this again…",
    "This should be good.",
    "I'm listening. Regretfully.",
    "Go on.",
    "Let's unpack that.",
    "Interesting opening statement.",
];

/// Status lines shown under a category response.
pub const DIAGNOSTICS: &[&str] = &[
    "Meeting attendance below baseline.",
    "Calls: avoiding.",
    "Step work suspiciously quiet.",
    "Self-awareness buffering…",
    "Emotional volume: high.",
    "Main character syndrome detected.",
    "Prayer",
    "Stepwork",
    "Meeting attendance",
    "Make phone calls",
    "Be of service",
];

/// Look up a pool by its key.
#[must_use]
pub fn find_pool(key: &str) -> Option<&'static CategoryPool> {
    CATEGORY_POOLS.iter().find(|pool| pool.key == key)
}
