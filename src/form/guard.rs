use std::ops::{Deref, DerefMut};

use super::FormSurface;

/// Holds the submit control disabled for as long as it lives.
///
/// Acquiring disables the control and shows the in-progress label. Dropping
/// re-enables it and puts back the label that was there before, on every exit
/// path (early return, panic, or the owning future being dropped mid-request).
pub struct SubmitGuard<'a, S: FormSurface + ?Sized> {
    surface: &'a mut S,
    restore_label: String,
}

impl<'a, S: FormSurface + ?Sized> SubmitGuard<'a, S> {
    pub fn acquire(surface: &'a mut S, in_progress_label: &str) -> Self {
        let restore_label = surface.submit_label();
        surface.set_submit_enabled(false);
        surface.set_submit_label(in_progress_label);

        SubmitGuard {
            surface,
            restore_label,
        }
    }
}

impl<S: FormSurface + ?Sized> Deref for SubmitGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        self.surface
    }
}

impl<S: FormSurface + ?Sized> DerefMut for SubmitGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface
    }
}

impl<S: FormSurface + ?Sized> Drop for SubmitGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.set_submit_enabled(true);
        self.surface.set_submit_label(&self.restore_label);
    }
}
