//! Fixed threat taxonomy shared by prompt construction and display.

/// A single category in the fixed threat taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreatCategory {
    /// Stable identifier the model is asked to echo back verbatim.
    pub id: &'static str,
    /// One-line definition, sent to the model as-is.
    pub description: &'static str,
}

/// The twelve threat categories, in prompt order.
pub const CATEGORIES: [ThreatCategory; 12] = [
    ThreatCategory {
        id: "information_leakage",
        description: "Exposure of sensitive data via the surface.",
    },
    ThreatCategory {
        id: "data_integrity_violation",
        description: "Unauthorized modification/destruction of data.",
    },
    ThreatCategory {
        id: "control_plane_subversion",
        description: "Unauthorized modification/execution on the control plane.",
    },
    ThreatCategory {
        id: "denial_of_service",
        description: "Degradation or loss of availability.",
    },
    ThreatCategory {
        id: "illegitimate_use",
        description: "Abuse/misuse of resources beyond intended purpose.",
    },
    ThreatCategory {
        id: "entity_spoofing",
        description: "Masquerading as another principal/service.",
    },
    ThreatCategory {
        id: "forgery",
        description: "Fabricating messages/requests accepted as if from a trusted source.",
    },
    ThreatCategory {
        id: "bypassing_control",
        description: "Circumventing security controls (filtering, validation, authN/Z gates).",
    },
    ThreatCategory {
        id: "authorization_violation",
        description: "Access beyond assigned permissions.",
    },
    ThreatCategory {
        id: "trojan",
        description: "Malicious/compromised components introduced via supply chain or artifact.",
    },
    ThreatCategory {
        id: "guessing",
        description: "Ability to deduce or predict sensitive values (e.g., keys, tokens, identifiers).",
    },
    ThreatCategory {
        id: "repudiation",
        description: "Denying actions/transactions due to insufficient auditability or tamper-proof logging.",
    },
];
