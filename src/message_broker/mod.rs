/// livestock 변경 이벤트 브로커 (Kafka)
/// 게이트웨이가 쓰기 후 ChangeEvent 를 발행하고,
/// 컨슈머가 받아서 로컬 구독 채널로 전달한다.
// region:    --- Imports
use crate::config::AppConfig;
use crate::error::GatewayError;
use crate::gateway::ChangeEvent;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::ClientConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

// endregion: --- Imports

// region:    --- Kafka Producer
#[derive(Clone)]
pub struct KafkaProducer {
    producer: Arc<FutureProducer>,
    topic: String,
}

impl KafkaProducer {
    pub fn new(brokers: &str, topic: &str) -> Result<Self, GatewayError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()
            .map_err(|e| GatewayError::Broker(format!("producer creation error: {e}")))?;

        Ok(KafkaProducer {
            producer: Arc::new(producer),
            topic: topic.to_string(),
        })
    }

    /// 변경 이벤트 발행 (키는 매물 id)
    pub async fn publish_change(&self, event: &ChangeEvent) -> Result<(), GatewayError> {
        let key = event.listing_id().to_string();
        let payload = serde_json::to_string(event)
            .map_err(|e| GatewayError::Broker(format!("serialize change event: {e}")))?;
        debug!(
            "{:<12} --> Kafka 메시지 전송: topic={}, key={}",
            "Producer", self.topic, key
        );
        let record = FutureRecord::to(&self.topic).key(&key).payload(&payload);

        self.producer
            .send(record, Duration::from_secs(0))
            .await
            .map_err(|(e, _)| GatewayError::Broker(format!("error sending message: {e:?}")))?;

        Ok(())
    }
}

// endregion: --- Kafka Producer

// region:    --- Kafka Consumer
pub struct KafkaConsumer {
    consumer: StreamConsumer,
    topic: String,
}

impl KafkaConsumer {
    pub fn new(brokers: &str, group_id: &str, topic: &str) -> Result<Self, GatewayError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", group_id)
            .set("enable.auto.commit", "true")
            .set("auto.offset.reset", "latest")
            .set("session.timeout.ms", "6000")
            .set("allow.auto.create.topics", "true")
            .create()
            .map_err(|e| GatewayError::Broker(format!("consumer creation error: {e}")))?;

        Ok(KafkaConsumer {
            consumer,
            topic: topic.to_string(),
        })
    }

    /// 변경 이벤트를 구독 채널로 전달
    /// 같은 매물의 이벤트는 같은 파티션으로 들어오므로 순서가 유지된다.
    pub async fn forward_changes(
        &self,
        sink: broadcast::Sender<ChangeEvent>,
    ) -> Result<(), GatewayError> {
        info!(
            "{:<12} --> Kafka 변경 구독 시작: topic={}",
            "Consumer", self.topic
        );
        self.consumer
            .subscribe(&[self.topic.as_str()])
            .map_err(|e| GatewayError::Broker(e.to_string()))?;

        loop {
            match self.consumer.recv().await {
                Ok(message) => {
                    debug!(
                        "{:<12} --> 메시지 수신: partition={}, offset={}",
                        "Consumer",
                        message.partition(),
                        message.offset()
                    );
                    let Some(payload) = message.payload() else {
                        warn!("{:<12} --> 빈 페이로드 수신", "Consumer");
                        continue;
                    };
                    match serde_json::from_slice::<ChangeEvent>(payload) {
                        Ok(event) => {
                            // 구독자가 없으면 버린다
                            let _ = sink.send(event);
                        }
                        Err(e) => error!("{:<12} --> deserialize 오류: {:?}", "Consumer", e),
                    }
                }
                Err(e) => error!("{:<12} --> 메시지 수신 오류: {:?}", "Consumer", e),
            }
        }
    }
}

// endregion: --- Kafka Consumer

// region:    --- Kafka Manager
pub struct KafkaManager {
    producer: Arc<KafkaProducer>,
    consumer: Arc<KafkaConsumer>,
    brokers: String,
    topic: String,
}

impl KafkaManager {
    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        let producer = Arc::new(KafkaProducer::new(
            &config.kafka_brokers,
            &config.changes_topic,
        )?);
        let consumer = Arc::new(KafkaConsumer::new(
            &config.kafka_brokers,
            &config.kafka_group_id,
            &config.changes_topic,
        )?);

        Ok(KafkaManager {
            producer,
            consumer,
            brokers: config.kafka_brokers.clone(),
            topic: config.changes_topic.clone(),
        })
    }

    pub fn get_producer(&self) -> Arc<KafkaProducer> {
        Arc::clone(&self.producer)
    }

    pub fn get_consumer(&self) -> Arc<KafkaConsumer> {
        Arc::clone(&self.consumer)
    }

    /// 변경 토픽 생성 (이미 있으면 무시)
    pub async fn create_changes_topic(
        &self,
        num_partitions: i32,
        replication_factor: i32,
    ) -> Result<(), GatewayError> {
        info!("{:<12} --> Kafka 토픽 생성 시작: {}", "Manager", self.topic);

        let admin_client: AdminClient<DefaultClientContext> = ClientConfig::new()
            .set("bootstrap.servers", &self.brokers)
            .create()
            .map_err(|e| GatewayError::Broker(format!("AdminClient 생성 실패: {e:?}")))?;

        let new_topic = NewTopic::new(
            &self.topic,
            num_partitions,
            TopicReplication::Fixed(replication_factor),
        );

        let results = admin_client
            .create_topics(&[new_topic], &AdminOptions::new())
            .await
            .map_err(|e| GatewayError::Broker(format!("토픽 생성 실패: {e:?}")))?;

        for result in results {
            match result {
                Ok(topic) => info!("{:<12} --> Kafka 토픽 생성 성공: {}", "Manager", topic),
                Err((topic, code)) => {
                    warn!(
                        "{:<12} --> Kafka 토픽 생성 건너뜀: {} ({:?})",
                        "Manager", topic, code
                    )
                }
            }
        }
        Ok(())
    }
}

// endregion: --- Kafka Manager
