//! Fixed table of known host applications.
//!
//! Target-application blocks in a manifest reference host applications by
//! GUID. Only applications in this table are importable; blocks naming any
//! other GUID are silently ignored, since third-party hosts are expected.

/// Descriptor of a known host application.
#[derive(Debug, PartialEq, Eq)]
pub struct AppDescriptor {
    /// Stable numeric identifier, used to scope version-catalog lookups.
    pub id: u32,
    /// Short human-readable name.
    pub short_name: &'static str,
    /// The application GUID as it appears in manifests.
    pub guid: &'static str,
}

/// All host applications add-ons can target.
pub const KNOWN_APPS: &[AppDescriptor] = &[
    AppDescriptor {
        id: 1,
        short_name: "firefox",
        guid: "{ec8030f7-c20a-464f-9b0e-13a3a9e97384}",
    },
    AppDescriptor {
        id: 18,
        short_name: "thunderbird",
        guid: "{3550f703-e582-4d05-9a08-453d09bdfdc6}",
    },
    AppDescriptor {
        id: 52,
        short_name: "sunbird",
        guid: "{718e30fb-e89b-41dd-9da7-e25a45638b28}",
    },
    AppDescriptor {
        id: 59,
        short_name: "seamonkey",
        guid: "{92650c4d-4b8e-4d2a-b7eb-24ecf4f6b63a}",
    },
    AppDescriptor {
        id: 60,
        short_name: "fennec",
        guid: "{a23983c0-fd0e-11dc-95ff-0800200c9a66}",
    },
];

/// Looks up a known application by its GUID.
#[must_use]
pub fn by_guid(guid: &str) -> Option<&'static AppDescriptor> {
    KNOWN_APPS.iter().find(|app| app.guid == guid)
}
