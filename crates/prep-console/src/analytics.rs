//! Dashboard figures for the admin console.
//!
//! There is no analytics store behind these numbers. Every figure is a pure
//! function of the clock and the configured primary exam, so repeated calls
//! with the same inputs always agree. Each operation has an `*_at` variant
//! taking the current time explicitly.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::ConsoleError, model::ExamCategory};

/// Number of weak topics returned when the caller gives no limit.
pub const DEFAULT_WEAK_TOPIC_LIMIT: usize = 5;

/// Series the time-series endpoint can plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ActiveUsers,
    QuestionsAnswered,
}

impl Metric {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ActiveUsers => "active_users",
            Self::QuestionsAnswered => "questions_answered",
        }
    }

    const fn base(&self) -> i64 {
        match self {
            Self::ActiveUsers => 750,
            Self::QuestionsAnswered => 1800,
        }
    }

    /// Value plotted for the day containing `at`.
    pub fn value_at(&self, at: DateTime<Utc>) -> i64 {
        let day = at.timestamp().div_euclid(86_400);
        self.base() + day.rem_euclid(200) + 100
    }
}

impl FromStr for Metric {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active_users" => Ok(Self::ActiveUsers),
            "questions_answered" => Ok(Self::QuestionsAnswered),
            _ => Err(ConsoleError::InvalidMetric),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look-back window for a time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeWindow {
    #[serde(rename = "today")]
    Today,
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl RangeWindow {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "7d",
            Self::Month => "30d",
        }
    }

    pub const fn days(&self) -> i64 {
        match self {
            Self::Today => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }
}

/// Empty input selects the default window.
impl FromStr for RangeWindow {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(Self::default()),
            "today" => Ok(Self::Today),
            "7d" | "7day" | "7days" => Ok(Self::Week),
            "30d" | "30day" | "30days" => Ok(Self::Month),
            _ => Err(ConsoleError::InvalidRange),
        }
    }
}

impl fmt::Display for RangeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub metric: Metric,
    pub exam: ExamCategory,
    pub range: RangeWindow,
    pub points: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAccuracyRow {
    pub subject_id: String,
    pub subject_name: String,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectAccuracy {
    pub exam: ExamCategory,
    pub subjects: Vec<SubjectAccuracyRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakTopic {
    pub subject_id: String,
    pub subject_name: String,
    pub topic_id: String,
    pub topic_name: String,
    pub accuracy: f64,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakTopics {
    pub items: Vec<WeakTopic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Mock,
    DailyTest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Scheduled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    pub id: String,
    pub name: String,
    pub exam: ExamCategory,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub start_at: DateTime<Utc>,
    pub registered_count: u32,
    pub status: EventStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingEvents {
    pub items: Vec<UpcomingEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralSummary {
    pub range: String,
    pub total_referrals: u32,
    pub rewards_paid: u32,
    pub new_users: u32,
}

/// Produces the console dashboard figures for a given primary exam.
#[derive(Debug, Clone, Copy)]
pub struct Analytics {
    primary_exam: ExamCategory,
}

impl Analytics {
    pub const fn new(primary_exam: ExamCategory) -> Self {
        Self { primary_exam }
    }

    pub const fn primary_exam(&self) -> ExamCategory {
        self.primary_exam
    }

    fn exam_or_default(&self, exam: Option<ExamCategory>) -> ExamCategory {
        exam.unwrap_or(self.primary_exam)
    }

    pub fn time_series(
        &self,
        metric: &str,
        exam: Option<ExamCategory>,
        range: &str,
    ) -> Result<TimeSeries, ConsoleError> {
        self.time_series_at(metric, exam, range, Utc::now())
    }

    /// One point per day, oldest first, ending at `now`.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::InvalidMetric`] for an unknown metric and
    /// [`ConsoleError::InvalidRange`] for an unknown window. The metric is
    /// checked first.
    pub fn time_series_at(
        &self,
        metric: &str,
        exam: Option<ExamCategory>,
        range: &str,
        now: DateTime<Utc>,
    ) -> Result<TimeSeries, ConsoleError> {
        let metric: Metric = metric.parse()?;
        let range: RangeWindow = range.parse()?;

        let days = range.days();
        let points = (0..days)
            .rev()
            .map(|offset| {
                let day = now - Duration::days(offset);
                TimeSeriesPoint {
                    date: day.format("%Y-%m-%d").to_string(),
                    value: metric.value_at(day),
                }
            })
            .collect();

        Ok(TimeSeries {
            metric,
            exam: self.exam_or_default(exam),
            range,
            points,
        })
    }

    pub fn subject_accuracy(&self, exam: Option<ExamCategory>) -> SubjectAccuracy {
        let row = |id: &str, name: &str, accuracy: f64| SubjectAccuracyRow {
            subject_id: id.to_string(),
            subject_name: name.to_string(),
            accuracy,
        };

        SubjectAccuracy {
            exam: self.exam_or_default(exam),
            subjects: vec![
                row("subj_anat", "Anatomy", 0.72),
                row("subj_biochem", "Biochemistry", 0.64),
                row("subj_path", "Pathology", 0.58),
                row("subj_pharma", "Pharmacology", 0.61),
            ],
        }
    }

    /// The weakest topics, truncated to `limit`. A zero limit, or one larger
    /// than the list, returns everything.
    pub fn weak_topics(&self, exam: Option<ExamCategory>, limit: usize) -> WeakTopics {
        let exam = self.exam_or_default(exam);
        let prefix = exam.label();

        let topic = |subject_id: &str, subject: &str, topic_id: &str, topic: &str, accuracy, attempts| {
            WeakTopic {
                subject_id: subject_id.to_string(),
                subject_name: format!("{prefix} {subject}"),
                topic_id: topic_id.to_string(),
                topic_name: topic.to_string(),
                accuracy,
                attempts,
            }
        };

        let mut topics = vec![
            topic("subj_pharma", "Pharmacology", "topic_autonomic", "Autonomic Drugs", 0.42, 1240),
            topic("subj_path", "Pathology", "topic_neoplasia", "Neoplasia", 0.48, 980),
            topic("subj_micro", "Microbiology", "topic_virology", "Virology", 0.45, 1110),
            topic("subj_anat", "Anatomy", "topic_neuro", "Neuro Anatomy", 0.41, 890),
        ];
        if limit > 0 {
            topics.truncate(limit);
        }

        WeakTopics { items: topics }
    }

    pub fn upcoming_events(&self, exam: Option<ExamCategory>) -> UpcomingEvents {
        self.upcoming_events_at(exam, Utc::now())
    }

    pub fn upcoming_events_at(&self, exam: Option<ExamCategory>, now: DateTime<Utc>) -> UpcomingEvents {
        let exam = self.exam_or_default(exam);

        UpcomingEvents {
            items: vec![
                UpcomingEvent {
                    id: "mock-bio-1".to_string(),
                    name: format!("{} - High Yield Bio Mock", exam.label()),
                    exam,
                    event_type: EventType::Mock,
                    start_at: now + Duration::hours(72),
                    registered_count: 2420,
                    status: EventStatus::Scheduled,
                },
                UpcomingEvent {
                    id: "daily-test-2".to_string(),
                    name: "Daily Rapid Fire".to_string(),
                    exam,
                    event_type: EventType::DailyTest,
                    start_at: now + Duration::hours(24),
                    registered_count: 1340,
                    status: EventStatus::Scheduled,
                },
            ],
        }
    }

    /// Referral totals for the window. Unrecognized windows get the 30 day figures.
    pub fn referral_summary(&self, range: &str) -> ReferralSummary {
        let range = match range.trim() {
            "" => RangeWindow::Month.as_str(),
            other => other,
        };

        let (total_referrals, rewards_paid, new_users) = match range {
            "7d" => (210, 4200, 75),
            "today" => (28, 980, 12),
            _ => (980, 18200, 320),
        };

        ReferralSummary {
            range: range.to_string(),
            total_referrals,
            rewards_paid,
            new_users,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn analytics() -> Analytics {
        Analytics::new(ExamCategory::NeetPg)
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 15, 30, 0).unwrap()
    }

    #[test]
    fn test_time_series_week() {
        let series = analytics()
            .time_series_at("active_users", None, "7d", fixed_now())
            .unwrap();

        assert_eq!(series.metric, Metric::ActiveUsers);
        assert_eq!(series.exam, ExamCategory::NeetPg);
        assert_eq!(series.range, RangeWindow::Week);
        assert_eq!(series.points.len(), 7);
        assert_eq!(series.points[0].date, "2024-03-04");
        assert_eq!(series.points[6].date, "2024-03-10");
        assert!(series.points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_time_series_is_deterministic() {
        let now = fixed_now();
        let a = analytics()
            .time_series_at("questions_answered", Some(ExamCategory::Jee), "30days", now)
            .unwrap();
        let b = analytics()
            .time_series_at("QUESTIONS_ANSWERED", Some(ExamCategory::Jee), "30d", now)
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(a.points.len(), 30);
        assert_eq!(a.exam, ExamCategory::Jee);
    }

    #[test]
    fn test_time_series_values() {
        let now = fixed_now();
        let day = now.timestamp() / 86_400;
        let series = analytics().time_series_at("active_users", None, "today", now).unwrap();

        assert_eq!(series.points.len(), 1);
        assert_eq!(series.points[0].value, 750 + day % 200 + 100);

        for point in &series.points {
            assert!((850..1050).contains(&point.value));
        }

        let series = analytics()
            .time_series_at("questions_answered", None, "", now)
            .unwrap();
        assert_eq!(series.range, RangeWindow::Week);
        assert!(series.points.iter().all(|p| (1900..2100).contains(&p.value)));
    }

    #[test]
    fn test_time_series_errors() {
        let now = fixed_now();

        let err = analytics().time_series_at("revenue", None, "7d", now).unwrap_err();
        assert_eq!(err, ConsoleError::InvalidMetric);

        let err = analytics()
            .time_series_at("active_users", None, "90d", now)
            .unwrap_err();
        assert_eq!(err, ConsoleError::InvalidRange);

        // Metric wins when both are bad.
        let err = analytics().time_series_at("bogus", None, "bogus", now).unwrap_err();
        assert_eq!(err, ConsoleError::InvalidMetric);
    }

    #[test]
    fn test_subject_accuracy() {
        let accuracy = analytics().subject_accuracy(Some(ExamCategory::Upsc));

        assert_eq!(accuracy.exam, ExamCategory::Upsc);
        assert_eq!(accuracy.subjects.len(), 4);
        assert_eq!(accuracy.subjects[0].subject_name, "Anatomy");
        assert_eq!(accuracy.subjects[3].accuracy, 0.61);
    }

    #[test]
    fn test_weak_topics_limit() {
        assert_eq!(analytics().weak_topics(None, 2).items.len(), 2);
        assert_eq!(analytics().weak_topics(None, 100).items.len(), 4);
        assert_eq!(analytics().weak_topics(None, 0).items.len(), 4);

        let topics = analytics().weak_topics(None, 1).items;
        assert_eq!(topics[0].subject_name, "NEET PG Pharmacology");
        assert_eq!(topics[0].topic_name, "Autonomic Drugs");
        assert_eq!(topics[0].attempts, 1240);
    }

    #[test]
    fn test_weak_topics_wire_shape() {
        let json = serde_json::to_value(analytics().weak_topics(None, 2)).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();

        assert_eq!(keys, ["items"]);
        assert_eq!(json["items"][0]["topicId"], "topic_autonomic");
    }

    #[test]
    fn test_upcoming_events() {
        let now = fixed_now();
        let events = analytics().upcoming_events_at(Some(ExamCategory::NeetUg), now);

        assert_eq!(events.items.len(), 2);
        assert_eq!(events.items[0].name, "NEET UG - High Yield Bio Mock");
        assert_eq!(events.items[0].start_at, now + Duration::hours(72));
        assert_eq!(events.items[1].event_type, EventType::DailyTest);
        assert_eq!(events.items[1].start_at, now + Duration::hours(24));
        assert!(events.items.iter().all(|e| e.exam == ExamCategory::NeetUg));

        let json = serde_json::to_value(&events).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["items"]);

        let first = &json["items"][0];
        assert_eq!(first["exam"], "NEET_UG");
        assert_eq!(first["type"], "MOCK");
        assert_eq!(first["status"], "SCHEDULED");
        assert_eq!(first["registeredCount"], 2420);
    }

    #[test]
    fn test_referral_summary_windows() {
        let summary = analytics().referral_summary("");
        assert_eq!(summary.range, "30d");
        assert_eq!(summary.total_referrals, 980);

        let summary = analytics().referral_summary("7d");
        assert_eq!((summary.total_referrals, summary.rewards_paid, summary.new_users), (210, 4200, 75));

        let summary = analytics().referral_summary("today");
        assert_eq!((summary.total_referrals, summary.rewards_paid, summary.new_users), (28, 980, 12));

        let summary = analytics().referral_summary("quarter");
        assert_eq!(summary.range, "quarter");
        assert_eq!(summary.rewards_paid, 18200);
    }
}
