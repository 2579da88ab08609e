use docintel_core::{AppViewModel, FlowKind, FlowView, NotificationView};

use crate::{PageCommand, PageHandles};

/// Commands that bring a page showing `previous` (or nothing, on first
/// render) to `next`. Unchanged parts produce no commands.
pub fn render(
    handles: &PageHandles,
    previous: Option<&AppViewModel>,
    next: &AppViewModel,
) -> Vec<PageCommand> {
    let mut cmds = Vec::new();

    if previous.map(|prev| prev.advanced_options_visible) != Some(next.advanced_options_visible) {
        cmds.push(PageCommand::SetVisible {
            element: handles.advanced_options.clone(),
            visible: next.advanced_options_visible,
        });
    }

    for flow in FlowKind::ALL {
        render_flow(
            handles,
            flow,
            previous.map(|prev| prev.flow(flow)),
            next.flow(flow),
            &mut cmds,
        );
    }

    render_banners(
        handles,
        previous.map_or(&[][..], |prev| prev.notifications.as_slice()),
        &next.notifications,
        &mut cmds,
    );

    cmds
}

fn render_flow(
    handles: &PageHandles,
    flow: FlowKind,
    previous: Option<&FlowView>,
    next: &FlowView,
    cmds: &mut Vec<PageCommand>,
) {
    let trigger = handles.trigger(flow);
    if previous.map(|prev| prev.trigger.enabled) != Some(next.trigger.enabled) {
        cmds.push(PageCommand::SetEnabled {
            element: trigger.clone(),
            enabled: next.trigger.enabled,
        });
    }
    if previous.map(|prev| (prev.trigger.label, prev.trigger.icon))
        != Some((next.trigger.label, next.trigger.icon))
    {
        cmds.push(PageCommand::SetTriggerLabel {
            element: trigger.clone(),
            label: next.trigger.label,
            icon: next.trigger.icon,
        });
    }

    if flow == FlowKind::Upload {
        if previous.map(|prev| prev.progress_visible) != Some(next.progress_visible) {
            cmds.push(PageCommand::SetVisible {
                element: handles.progress_region.clone(),
                visible: next.progress_visible,
            });
        }
        let shown = next.content.is_some();
        if previous.map(|prev| prev.content.is_some()) != Some(shown) {
            cmds.push(PageCommand::SetVisible {
                element: handles.results_section.clone(),
                visible: shown,
            });
        }
    }

    let before = previous.and_then(|prev| prev.content.as_ref());
    match &next.content {
        Some(view) if before != Some(view) => cmds.push(PageCommand::Mount {
            element: handles.mount_point(flow).clone(),
            view: view.clone(),
        }),
        // The upload results region is hidden instead and keeps its content.
        None if before.is_some() && flow != FlowKind::Upload => cmds.push(PageCommand::Clear {
            element: handles.mount_point(flow).clone(),
        }),
        _ => {}
    }
}

fn render_banners(
    handles: &PageHandles,
    previous: &[NotificationView],
    next: &[NotificationView],
    cmds: &mut Vec<PageCommand>,
) {
    for gone in previous
        .iter()
        .filter(|banner| !next.iter().any(|b| b.id == banner.id))
    {
        cmds.push(PageCommand::RemoveBanner { id: gone.id });
    }
    // `next` is newest first; insert oldest first so the newest ends on top.
    for added in next
        .iter()
        .rev()
        .filter(|banner| !previous.iter().any(|b| b.id == banner.id))
    {
        cmds.push(PageCommand::InsertBanner {
            container: handles.notification_container.clone(),
            banner: added.clone(),
        });
    }
}
