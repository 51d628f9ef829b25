use std::sync::Arc;
use std::time::Duration;

use spr_core::Task;
use spr_exec::executor::queue::TaskQueue;

#[tokio::test]
async fn join_returns_immediately_on_empty_queue() {
    let queue = TaskQueue::new(4);
    tokio::time::timeout(Duration::from_millis(100), queue.join())
        .await
        .unwrap();
}

#[tokio::test]
async fn join_waits_for_every_task_to_be_marked_done() {
    let queue = Arc::new(TaskQueue::new(4));
    queue.push(Task::get("http://a.test/1")).await.unwrap();
    queue.push(Task::get("http://a.test/2")).await.unwrap();
    assert_eq!(queue.unfinished(), 2);

    let joiner = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.join().await })
    };

    let first = queue.pop().await.unwrap();
    assert_eq!(first.url, "http://a.test/1");
    queue.task_done();
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(!joiner.is_finished());

    let second = queue.pop().await.unwrap();
    {
        let _done = queue.done_guard();
        assert_eq!(second.url, "http://a.test/2");
    }

    tokio::time::timeout(Duration::from_millis(200), joiner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(queue.unfinished(), 0);
}

#[tokio::test]
async fn push_waits_while_queue_is_full() {
    let queue = Arc::new(TaskQueue::new(1));
    queue.push(Task::get("http://a.test/1")).await.unwrap();

    let blocked = tokio::time::timeout(Duration::from_millis(50), queue.push(Task::get("http://a.test/2"))).await;
    assert!(blocked.is_err());
    // the cancelled push must not count as enqueued
    assert_eq!(queue.unfinished(), 1);

    queue.pop().await.unwrap();
    queue.push(Task::get("http://a.test/3")).await.unwrap();
    assert_eq!(queue.pop().await.unwrap().url, "http://a.test/3");
}
