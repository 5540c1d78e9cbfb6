use crate::error::{Error, Result};
use std::sync::mpsc;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

enum Message {
    NewJob(Job),
    Terminate,
}

#[derive(Debug)]
pub struct ThreadPool {
    workers: Vec<Worker>,
    job_sender: mpsc::Sender<Message>,
}

type Job = Box<dyn FnOnce() + Send + 'static>;

impl ThreadPool {
    /// 创建线程池。
    ///
    /// `size`线程池中线程的数量。
    ///
    /// # Panics
    ///
    /// `new` 函数在 size 为 0 时会 panic
    pub fn new(size: usize) -> ThreadPool {
        assert!(size > 0);

        // 所有工作线程共享同一个任务接收端
        let (job_sender, job_receiver) = mpsc::channel();

        let job_receiver = Arc::new(Mutex::new(job_receiver));

        let mut workers = Vec::with_capacity(size);

        for id in 0..size {
            workers.push(Worker::new(id, Arc::clone(&job_receiver)));
        }

        ThreadPool {
            workers,
            job_sender,
        }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// 需要在多线程中执行的闭包函数
    pub fn execute<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let job = Box::new(f);
        self.job_sender
            .send(Message::NewJob(job))
            .map_err(|_| Error::worker("all workers have stopped"))
    }
}

/// 工作任务
#[derive(Debug)]
struct Worker {
    /// 工作线程id
    id: usize,
    /// 保存创建的线程
    thread: Option<thread::JoinHandle<()>>,
}

impl Worker {
    fn new(id: usize, receiver: Arc<Mutex<mpsc::Receiver<Message>>>) -> Worker {
        let thread = thread::spawn(move || loop {
            // 只在取任务时持有锁，任务本身在锁外执行
            let message = match receiver.lock() {
                Ok(receiver) => receiver.recv(),
                Err(_) => break,
            };

            match message {
                // 工作消息执行工作
                Ok(Message::NewJob(job)) => {
                    job();
                }
                // 关闭线程消息，或者线程池已经被释放
                Ok(Message::Terminate) | Err(_) => break,
            }
        });
        tracing::debug!(worker = id, "worker started");
        Worker {
            id,
            thread: Some(thread),
        }
    }
}

impl Drop for ThreadPool {
    // 在清理数据时结束线程
    fn drop(&mut self) {
        for _ in &self.workers {
            let _ = self.job_sender.send(Message::Terminate);
        }

        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                if thread.join().is_err() {
                    tracing::warn!(worker = worker.id, "worker panicked");
                }
            }
        }
    }
}
