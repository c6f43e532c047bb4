//! Validation of closed matches and conversion into events.

use crate::error::DropReason;
use crate::event::AssetEvent;
use crate::group::Group;
use crate::span::{Location, Span};

use super::pending::PendingMatch;

/// Turn a closed match into its event, checking the group's required field.
///
/// | Group        | Requires                     |
/// |--------------|------------------------------|
/// | Image        | link                         |
/// | LinkResource | link                         |
/// | Script       | link, else content           |
/// | Style        | content                      |
/// | Import       | link (the workflow id)       |
pub(crate) fn finish(pending: PendingMatch, end: Location) -> Result<AssetEvent, DropReason> {
    let PendingMatch {
        group,
        attributes,
        link,
        content,
        start,
        ..
    } = pending;
    let span = Span::new(start, end);

    match group {
        Group::Image => link
            .map(|link| AssetEvent::ImageLink {
                link,
                attributes,
                span,
            })
            .ok_or(DropReason::MissingLink),
        Group::LinkResource => link
            .map(|link| AssetEvent::Link {
                link,
                attributes,
                span,
            })
            .ok_or(DropReason::MissingLink),
        Group::Script => match (link, content) {
            (Some(link), _) => Ok(AssetEvent::ScriptLink {
                link,
                attributes,
                span,
            }),
            (None, Some(content)) => Ok(AssetEvent::ScriptContent {
                content,
                attributes,
                span,
            }),
            (None, None) => Err(DropReason::MissingLinkOrContent),
        },
        Group::Style => content
            .map(|content| AssetEvent::CssContent {
                content,
                attributes,
                span,
            })
            .ok_or(DropReason::MissingContent),
        Group::Import => link
            .map(|workflow_id| AssetEvent::Import {
                workflow_id,
                attributes,
                span,
            })
            .ok_or(DropReason::MissingLink),
    }
}
