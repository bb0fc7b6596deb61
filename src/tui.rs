//! # Terminal handling
//!
//! Entering and leaving the alternate screen for the interactive checker.
//! The terminal must be restored however the checker ends, including by
//! panic, or the user is left staring at a raw-mode shell.

use std::{
	io::{self, stdout, Stdout},
	panic::{self, PanicHookInfo},
	sync::{Arc, Mutex},
	thread
};

use crossterm::{
	execute,
	terminal::{
		disable_raw_mode, enable_raw_mode,
		EnterAlternateScreen, LeaveAlternateScreen
	}
};
use log::warn;
use ratatui::{backend::{Backend, CrosstermBackend}, Terminal};

/// The terminal driven by the interactive checker.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// A panic hook, as answered by [`panic::take_hook`].
type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Run `f` against the terminal in raw mode on the alternate screen, then
/// restore the terminal. A panic on the calling thread restores the terminal
/// before the previous panic hook reports it; panics on other threads are
/// reported untouched.
///
/// # Arguments
///
/// * `f` - The function to apply to the terminal.
///
/// # Returns
///
/// The result of `f`.
///
/// # Errors
///
/// Any error that occurs while entering or leaving the alternate screen, or
/// any error answered by `f`.
pub fn with_tui<F, T>(f: F) -> io::Result<T>
	where F: FnOnce(&mut Tui) -> io::Result<T>
{
	let previous = install_panic_hook();
	// Entering is not atomic, so leave even if it fails partway.
	let result = enter().and_then(|mut terminal| f(&mut terminal));
	// Reinstate the previous hook first, so that a panic while leaving does
	// not try to leave again.
	let hook = previous.lock().ok().and_then(|mut hook| hook.take());
	match hook
	{
		Some(hook) => panic::set_hook(hook),
		None => warn!("previous panic hook unavailable")
	}
	leave()?;
	result
}

/// Install a panic hook that restores the terminal when the current thread
/// panics, then defers to the previous hook.
///
/// # Returns
///
/// The previous hook, for reinstatement.
fn install_panic_hook() -> Arc<Mutex<Option<PanicHook>>>
{
	let previous = Arc::new(Mutex::new(Some(panic::take_hook())));
	let shared = Arc::clone(&previous);
	let ui_thread = thread::current().id();
	panic::set_hook(Box::new(move |info| {
		if thread::current().id() == ui_thread
		{
			// Already panicking, so the outcome is moot.
			let _ = leave();
		}
		// Leave the hook in place: it may be invoked again by another thread.
		if let Ok(hook) = shared.lock()
		{
			if let Some(hook) = hook.as_ref()
			{
				hook(info);
			}
		}
	}));
	previous
}

/// Enter raw mode on the alternate screen.
///
/// # Errors
///
/// Any error that occurs while configuring the terminal.
fn enter() -> io::Result<Tui>
{
	let mut stdout = stdout();
	execute!(stdout, EnterAlternateScreen)?;
	enable_raw_mode()?;
	Terminal::new(CrosstermBackend::new(stdout))
}

/// Leave the alternate screen, disable raw mode, and show the cursor.
///
/// # Errors
///
/// Any error that occurs while configuring the terminal.
fn leave() -> io::Result<()>
{
	let mut stdout = stdout();
	execute!(stdout, LeaveAlternateScreen)?;
	disable_raw_mode()?;
	CrosstermBackend::new(stdout).show_cursor()
}
