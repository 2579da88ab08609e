use docintel_app::{render, PageCommand, PageHandles};
use docintel_core::{
    el, AppViewModel, NotificationCenter, NotificationId, NotificationView, Severity,
};
use pretty_assertions::assert_eq;

/// Ids as a notification center hands them out, oldest first.
fn issued_ids(count: usize) -> Vec<NotificationId> {
    let mut center = NotificationCenter::new();
    (0..count)
        .map(|n| center.notify(format!("banner {n}"), Severity::Info))
        .collect()
}

fn banner(id: NotificationId, message: &str) -> NotificationView {
    NotificationView {
        id,
        message: message.to_string(),
        severity: Severity::Info,
    }
}

#[test]
fn identical_views_produce_no_commands() {
    let handles = PageHandles::default();
    let mut view = AppViewModel::default();
    view.batch.content = Some(el("p").text("done").into());

    assert!(render(&handles, Some(&view), &view.clone()).is_empty());
}

#[test]
fn only_the_changed_mount_is_reissued() {
    let handles = PageHandles::default();
    let previous = AppViewModel::default();
    let mut next = previous.clone();
    next.batch.content = Some(el("p").text("collections").into());

    let commands = render(&handles, Some(&previous), &next);
    assert_eq!(
        commands,
        vec![PageCommand::Mount {
            element: "challenge1BResults".into(),
            view: el("p").text("collections").into(),
        }]
    );
}

#[test]
fn upload_content_toggles_results_section_without_clearing() {
    let handles = PageHandles::default();
    let mut previous = AppViewModel::default();
    previous.upload.content = Some(el("p").text("report").into());
    let mut next = previous.clone();
    next.upload.content = None;
    next.upload.progress_visible = true;

    let commands = render(&handles, Some(&previous), &next);
    assert_eq!(
        commands,
        vec![
            PageCommand::SetVisible {
                element: "progressSection".into(),
                visible: true,
            },
            PageCommand::SetVisible {
                element: "resultsSection".into(),
                visible: false,
            },
        ]
    );
}

#[test]
fn custom_content_removal_clears_mount_point() {
    let handles = PageHandles::default();
    let mut previous = AppViewModel::default();
    previous.custom.content = Some(el("div").text("Analyzing PDF with AI...").into());
    let next = AppViewModel::default();

    assert_eq!(
        render(&handles, Some(&previous), &next),
        vec![PageCommand::Clear {
            element: "customChallenge1BResults".into(),
        }]
    );
}

#[test]
fn banners_are_diffed_by_id() {
    let handles = PageHandles::default();
    let ids = issued_ids(4);
    let mut previous = AppViewModel::default();
    previous.notifications = vec![banner(ids[1], "second"), banner(ids[0], "first")];
    let mut next = AppViewModel::default();
    next.notifications = vec![
        banner(ids[3], "fourth"),
        banner(ids[2], "third"),
        banner(ids[1], "second"),
    ];

    let commands = render(&handles, Some(&previous), &next);
    assert_eq!(
        commands,
        vec![
            PageCommand::RemoveBanner { id: ids[0] },
            PageCommand::InsertBanner {
                container: "alertContainer".into(),
                banner: banner(ids[2], "third"),
            },
            PageCommand::InsertBanner {
                container: "alertContainer".into(),
                banner: banner(ids[3], "fourth"),
            },
        ]
    );
}

#[test]
fn custom_handles_redirect_commands() {
    let handles = PageHandles {
        batch_results: "collectionsPanel".into(),
        ..PageHandles::default()
    };
    let mut next = AppViewModel::default();
    next.batch.content = Some(el("p").text("ok").into());

    let commands = render(&handles, Some(&AppViewModel::default()), &next);
    assert!(matches!(
        commands.as_slice(),
        [PageCommand::Mount { element, .. }] if element.as_str() == "collectionsPanel"
    ));
}
