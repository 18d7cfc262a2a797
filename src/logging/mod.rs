use std::{fmt::Write as _, thread, time::Duration};

use chrono::{format::DelayedFormat, DateTime, Local};
use crossbeam_channel::{bounded, unbounded, Sender};
use once_cell::sync::Lazy;

use crate::logging::rotate::Rotate;

pub mod rotate;

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("yf_fundamentals"));

/// 等待寫檔線程回應 flush 的上限
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

enum Command {
    Write(LogMessage),
    /// 寫出緩衝中的內容後回覆
    Flush(Sender<()>),
}

pub struct Logger {
    writer: Sender<Command>,
}

impl Logger {
    fn new(log_name: &str) -> Self {
        let (tx, rx) = unbounded::<Command>();
        let fn_pattern = format!("log/%Y-%m-%d-{}.log", log_name);

        // 寫入檔案的操作使用另一個線程處理
        thread::spawn(move || {
            let mut rotate = Rotate::new(fn_pattern);
            let mut line = String::with_capacity(4096);
            let mut last_at = Local::now();

            for received in &rx {
                match received {
                    Command::Write(received) => {
                        last_at = received.created_at;
                        if writeln!(
                            &mut line,
                            "{} {} {}",
                            received.created_at.format("%F %X%.6f"),
                            received.level,
                            received.msg
                        )
                        .is_err()
                        {
                            continue;
                        }

                        if rx.is_empty() || line.len() >= 4096 {
                            write_line(&mut rotate, last_at, &mut line);
                        }
                    }
                    Command::Flush(ack) => {
                        write_line(&mut rotate, last_at, &mut line);
                        let _ = ack.send(());
                    }
                }
            }

            write_line(&mut rotate, last_at, &mut line);
        });

        Logger { writer: tx }
    }

    fn info(&self, log: String) {
        self.send(log::Level::Info, log);
    }

    fn warn(&self, log: String) {
        self.send(log::Level::Warn, log);
    }

    fn error(&self, log: String) {
        self.send(log::Level::Error, log);
    }

    fn debug(&self, log: String) {
        self.send(log::Level::Debug, log);
    }

    fn send(&self, level: log::Level, msg: String) {
        if let Err(why) = self.writer.send(Command::Write(LogMessage::new(level, msg))) {
            error_console(why.to_string());
        }
    }

    /// 送出 flush 並等待寫檔線程處理完先前所有訊息
    fn flush(&self) -> bool {
        let (ack_tx, ack_rx) = bounded::<()>(1);
        if self.writer.send(Command::Flush(ack_tx)).is_err() {
            return false;
        }

        ack_rx.recv_timeout(FLUSH_TIMEOUT).is_ok()
    }
}

fn write_line(rotate: &mut Rotate, at: DateTime<Local>, line: &mut String) {
    if line.is_empty() {
        return;
    }

    if let Err(why) = rotate.write_msg(at, line.as_bytes()) {
        error_console(format!(
            "Failed to write log file {} because {:?}",
            rotate.current_file(),
            why
        ));
        info_console(line.clone());
    }
    rotate.flush();
    line.clear();
}

pub struct LogMessage {
    pub level: log::Level,
    pub msg: String,
    pub created_at: DateTime<Local>,
}

impl LogMessage {
    pub fn new(level: log::Level, msg: String) -> Self {
        LogMessage {
            level,
            msg,
            created_at: Local::now(),
        }
    }
}

pub fn info_file_async(log: String) {
    LOGGER.info(log);
}

pub fn warn_file_async(log: String) {
    LOGGER.warn(log);
}

pub fn error_file_async(log: String) {
    LOGGER.error(log);
}

pub fn debug_file_async(log: String) {
    LOGGER.debug(log);
}

/// 程式結束前呼叫，確保已送出的訊息都寫入檔案；逾時回傳 `false`
pub fn flush() -> bool {
    LOGGER.flush()
}

pub fn info_console(log: String) {
    println!(
        "{} Info {}",
        Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
        log
    );
}

pub fn error_console(log: String) {
    eprintln!(
        "{} Error {}",
        DelayedFormat::to_string(&Local::now().format("%Y-%m-%d %H:%M:%S.%3f")),
        log
    );
}
