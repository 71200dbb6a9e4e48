//! Walks a loaded manifest graph into a typed record.

use crate::Result;
use crate::apps;
use crate::catalog::VersionCatalog;

use super::graph::ManifestGraph;
use super::record::AddonType;
use super::record::ManifestRecord;
use super::record::TargetApplication;

/// Extracts the typed metadata record from a loaded manifest graph.
///
/// Scalar fields are read off the manifest root; compatibility entries are
/// gathered from every `em:targetApplication` block in the graph and
/// resolved against the known-applications table and the version catalog.
///
/// A missing `em:id` produces a record with an empty identifier rather than
/// an error — whether that is acceptable is the pipeline's call.
///
/// # Errors
///
/// Returns `ImportError::RootNotFound` if the graph has no resolvable
/// install-manifest root.
pub fn extract(graph: &ManifestGraph, versions: &dyn VersionCatalog) -> Result<ManifestRecord> {
    let root = graph.find_root()?;
    let field = |name: &str| graph.literal(name, &root).map(str::to_owned);

    Ok(ManifestRecord {
        guid: field("id").unwrap_or_default(),
        addon_type: AddonType::from_code(graph.literal("type", &root)),
        name: field("name"),
        version: field("version"),
        homepage: field("homepageURL"),
        description: field("description"),
        apps: target_applications(graph, versions),
    })
}

/// Resolves every target-application block, preserving enumeration order.
///
/// Blocks naming an unknown application GUID, or declaring a min/max
/// version the catalog has no record of, are skipped silently: third-party
/// hosts and unrecorded versions are expected, not errors.
fn target_applications(
    graph: &ManifestGraph,
    versions: &dyn VersionCatalog,
) -> Vec<TargetApplication> {
    let mut resolved = Vec::new();

    for context in graph.objects_of("targetApplication") {
        let Some(application) = graph.literal("id", &context).and_then(apps::by_guid) else {
            continue;
        };
        let Some(min) = graph
            .literal("minVersion", &context)
            .and_then(|v| versions.lookup(application.id, v))
        else {
            continue;
        };
        let Some(max) = graph
            .literal("maxVersion", &context)
            .and_then(|v| versions.lookup(application.id, v))
        else {
            continue;
        };

        resolved.push(TargetApplication {
            application,
            min,
            max,
        });
    }

    resolved
}
