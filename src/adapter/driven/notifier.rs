use crate::domain::port::Notifier;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// コンソール通知
/// 通知メッセージを標準エラー出力に表示する
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("⚠️  {}", message);
    }
}

/// バッファ通知
/// 通知を発生順に保持し、まとめて取り出せるようにする
/// REST APIから利用者に通知を返すために使う
///
/// 保持数が上限に達すると最も古い通知から捨てる
#[derive(Debug)]
pub struct BufferedNotifier {
    messages: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl BufferedNotifier {
    /// 既定の保持上限
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// 保持上限を指定して作成（0は1として扱う）
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    fn lock_messages(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 保持している通知を取り出してバッファを空にする
    pub fn drain(&self) -> Vec<String> {
        self.lock_messages().drain(..).collect()
    }

    /// 保持している通知の数
    pub fn pending(&self) -> usize {
        self.lock_messages().len()
    }

    /// 保持上限
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BufferedNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for BufferedNotifier {
    fn notify(&self, message: &str) {
        let mut messages = self.lock_messages();
        while messages.len() >= self.capacity {
            messages.pop_front();
        }
        messages.push_back(message.to_string());
    }
}

/// 複数の通知先に同じメッセージを配信する
pub struct CompositeNotifier {
    targets: Vec<Arc<dyn Notifier>>,
}

impl CompositeNotifier {
    pub fn new(targets: Vec<Arc<dyn Notifier>>) -> Self {
        Self { targets }
    }
}

impl Notifier for CompositeNotifier {
    fn notify(&self, message: &str) {
        for target in &self.targets {
            target.notify(message);
        }
    }
}
