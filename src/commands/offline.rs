use crate::error::Result;
use crate::notify::{Notification, Notifier};
use crate::store::{StateStore, toggle_offline};

fn report(notifier: &dyn Notifier, offline: bool) {
    if offline {
        notifier.notify(Notification::info(
            "Offline Mode",
            "Sample data will be served instead of live API calls.",
        ));
    } else {
        notifier.notify(Notification::success(
            "Online Mode",
            "Live API calls are enabled.",
        ));
    }
}

/// Print whether offline mode is enabled.
pub fn cmd_offline_status(store: &dyn StateStore) -> Result<()> {
    if store.offline() {
        println!("offline (sample data)");
    } else {
        println!("online");
    }
    Ok(())
}

/// Set the offline flag to an explicit value.
pub fn cmd_offline_set(store: &dyn StateStore, notifier: &dyn Notifier, offline: bool) -> Result<()> {
    store.set_offline(offline);
    report(notifier, offline);
    Ok(())
}

/// Flip the offline flag.
pub fn cmd_offline_toggle(store: &dyn StateStore, notifier: &dyn Notifier) -> Result<()> {
    let offline = toggle_offline(store);
    report(notifier, offline);
    Ok(())
}
