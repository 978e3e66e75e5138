//! Asset loading seam.
//!
//! The engine never decodes images or audio itself. During preload it hands
//! each declared asset to an [`AssetLoader`] together with a signal sender;
//! the loader delivers exactly one [`AssetSignal`] per request, in any order.
//! The preload stage settles when every requested asset has signalled, and
//! fails on the first error signal.

use crossbeam_channel::{Receiver, Sender, unbounded};
use rustc_hash::FxHashMap;

/// Which registry a loadable asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Sprite,
    Audio,
}

/// One settle signal for a requested asset.
#[derive(Debug, Clone)]
pub struct AssetSignal {
    pub name: String,
    pub kind: AssetKind,
    /// `Ok(())` when the resource is ready, `Err(reason)` on failure.
    pub outcome: Result<(), String>,
}

impl AssetSignal {
    pub fn ready(name: impl Into<String>, kind: AssetKind) -> Self {
        AssetSignal {
            name: name.into(),
            kind,
            outcome: Ok(()),
        }
    }

    pub fn failed(name: impl Into<String>, kind: AssetKind, reason: impl Into<String>) -> Self {
        AssetSignal {
            name: name.into(),
            kind,
            outcome: Err(reason.into()),
        }
    }
}

/// Host-side loader of sprite images and audio clips.
///
/// Implementations must eventually send exactly one signal per request on
/// `reply`. There is no timeout: a request that never settles stalls the
/// preload stage.
pub trait AssetLoader {
    fn request(&mut self, kind: AssetKind, name: &str, source: &str, reply: Sender<AssetSignal>);
}

/// Loader that settles every request immediately on the calling thread.
///
/// Default-ready; individual assets can be scripted to fail by name. Used by
/// tests and the headless demo, where no real decoding happens.
#[derive(Debug, Default)]
pub struct EagerLoader {
    failures: FxHashMap<String, String>,
}

impl EagerLoader {
    pub fn new() -> Self {
        EagerLoader {
            failures: FxHashMap::default(),
        }
    }

    /// Script a failure outcome for the named asset.
    pub fn with_failure(mut self, name: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failures.insert(name.into(), reason.into());
        self
    }
}

impl AssetLoader for EagerLoader {
    fn request(&mut self, kind: AssetKind, name: &str, _source: &str, reply: Sender<AssetSignal>) {
        let signal = match self.failures.get(name) {
            Some(reason) => AssetSignal::failed(name, kind, reason.clone()),
            None => AssetSignal::ready(name, kind),
        };
        // A dropped receiver just means the engine already ended.
        let _ = reply.send(signal);
    }
}

enum LoaderCmd {
    Probe {
        kind: AssetKind,
        name: String,
        source: String,
        reply: Sender<AssetSignal>,
    },
    Shutdown,
}

/// Loader that settles requests from a background thread by probing the
/// filesystem: an asset is ready when its source path exists and is a file.
///
/// Commands flow to the thread over a channel and the thread is joined on
/// drop, mirroring the engine's single-threaded model: the thread only
/// produces settle signals, it never touches engine state.
pub struct FsLoader {
    tx_cmd: Sender<LoaderCmd>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl FsLoader {
    /// Spawn the loader thread.
    pub fn spawn() -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<LoaderCmd>();
        let handle = std::thread::spawn(move || loader_thread(rx_cmd));
        FsLoader {
            tx_cmd,
            handle: Some(handle),
        }
    }
}

impl AssetLoader for FsLoader {
    fn request(&mut self, kind: AssetKind, name: &str, source: &str, reply: Sender<AssetSignal>) {
        let cmd = LoaderCmd::Probe {
            kind,
            name: name.to_string(),
            source: source.to_string(),
            reply,
        };
        if self.tx_cmd.send(cmd).is_err() {
            log::error!("asset loader thread is gone, request for '{}' dropped", name);
        }
    }
}

impl Drop for FsLoader {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(LoaderCmd::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn loader_thread(rx_cmd: Receiver<LoaderCmd>) {
    while let Ok(cmd) = rx_cmd.recv() {
        match cmd {
            LoaderCmd::Probe {
                kind,
                name,
                source,
                reply,
            } => {
                let signal = match std::fs::metadata(&source) {
                    Ok(meta) if meta.is_file() => AssetSignal::ready(&name, kind),
                    Ok(_) => AssetSignal::failed(&name, kind, format!("'{}' is not a file", source)),
                    Err(e) => AssetSignal::failed(&name, kind, e.to_string()),
                };
                let _ = reply.send(signal);
            }
            LoaderCmd::Shutdown => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eager_loader_signals_ready() {
        let (tx, rx) = unbounded();
        let mut loader = EagerLoader::new();
        loader.request(AssetKind::Sprite, "ship", "assets/ship.png", tx);
        let signal = rx.recv().expect("signal");
        assert_eq!(signal.name, "ship");
        assert_eq!(signal.kind, AssetKind::Sprite);
        assert!(signal.outcome.is_ok());
    }

    #[test]
    fn eager_loader_scripted_failure() {
        let (tx, rx) = unbounded();
        let mut loader = EagerLoader::new().with_failure("boom", "decode error");
        loader.request(AssetKind::Audio, "boom", "assets/boom.ogg", tx);
        let signal = rx.recv().expect("signal");
        assert_eq!(signal.outcome, Err("decode error".to_string()));
    }

    #[test]
    fn fs_loader_settles_existing_and_missing_paths() {
        let dir = std::env::temp_dir().join("overture2d-loader-test");
        std::fs::create_dir_all(&dir).expect("temp dir");
        let file = dir.join("present.png");
        std::fs::write(&file, b"png").expect("write temp file");

        let (tx, rx) = unbounded();
        let mut loader = FsLoader::spawn();
        loader.request(
            AssetKind::Sprite,
            "present",
            file.to_str().expect("utf8 path"),
            tx.clone(),
        );
        loader.request(
            AssetKind::Sprite,
            "absent",
            dir.join("absent.png").to_str().expect("utf8 path"),
            tx,
        );

        let mut outcomes = FxHashMap::default();
        for _ in 0..2 {
            let signal = rx.recv().expect("signal");
            outcomes.insert(signal.name.clone(), signal.outcome.is_ok());
        }
        assert_eq!(outcomes.get("present"), Some(&true));
        assert_eq!(outcomes.get("absent"), Some(&false));

        let _ = std::fs::remove_file(&file);
    }
}
