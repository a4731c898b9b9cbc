//! 日志输出端：拦截器每次调用只写一行（可能含换行的）文本。

/// 日志写入能力。
pub trait LogSink: Send + Sync {
    fn write(&self, line: &str);
}

/// 任意 `Fn(&str)` 闭包都可以当作输出端。
impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn write(&self, line: &str) {
        self(line)
    }
}

/// 默认输出端：作为 `info` 事件交给 `tracing`。
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, line: &str) {
        tracing::info!(target: "halo_space::sqllog", "{line}");
    }
}

/// 直接写标准错误输出，不经过 `tracing`（便于在终端里高亮查看）。
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, line: &str) {
        eprint!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::{LogSink, StderrSink, TracingSink};
    use std::sync::Mutex;

    #[test]
    fn closures_are_sinks() {
        let lines = Mutex::new(Vec::<String>::new());
        let sink = |line: &str| lines.lock().unwrap().push(line.to_string());
        sink.write("a");
        sink.write("b");
        assert_eq!(*lines.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn builtin_sinks_accept_lines() {
        let sinks: [&dyn LogSink; 2] = [&TracingSink, &StderrSink];
        for s in sinks {
            s.write("==>> method t executed sql: \n SELECT 1 ;\n");
        }
    }
}
