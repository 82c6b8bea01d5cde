//! Computed attributes of the catalogue.
use jobgraph::{
    error::ComputeError,
    model::AttrContext,
    value::{Document, Value},
};
use time::{Duration, OffsetDateTime};

pub const UNIT_LONG_AGO: &str = "مدت\u{200c}ها پیش";
pub const UNIT_JUST_NOW: &str = "به تازگی";
pub const UNIT_MINUTES: &str = "دقایقی پیش";
pub const UNIT_HALF_HOUR: &str = "نیم\u{200c}ساعت پیش";
pub const UNIT_MINUTES_AGO: &str = "دقیقه پیش";
pub const UNIT_HOURS_AGO: &str = "ساعت پیش";
pub const UNIT_TODAY: &str = "امروز";
pub const UNIT_YESTERDAY: &str = "دیروز";
pub const UNIT_DAYS_AGO: &str = "روز پیش";
pub const UNIT_WEEKS_AGO: &str = "هفته قبل";
pub const UNIT_MONTHS_AGO: &str = "ماه پیش";

/// Every unit an age bucket can carry.
pub const AGE_UNITS: &[&str] = &[
    UNIT_LONG_AGO,
    UNIT_JUST_NOW,
    UNIT_MINUTES,
    UNIT_HALF_HOUR,
    UNIT_MINUTES_AGO,
    UNIT_HOURS_AGO,
    UNIT_TODAY,
    UNIT_YESTERDAY,
    UNIT_DAYS_AGO,
    UNIT_WEEKS_AGO,
    UNIT_MONTHS_AGO,
];

///
/// AgeBucket
/// Relative age of a posting, as shown next to it.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AgeBucket {
    pub unit: &'static str,
    pub amount: i64,
}

impl AgeBucket {
    const fn new(unit: &'static str, amount: i64) -> Self {
        Self { unit, amount }
    }

    /// Bucket an age. Negative ages (clock skew) read as "just now".
    #[must_use]
    pub fn of(age: Duration) -> Self {
        let age = age.max(Duration::ZERO);
        let days = age.whole_days();
        let seconds = (age - Duration::days(days)).whole_seconds();
        let minutes = seconds / 60;
        let hours = seconds / 3600;

        match days {
            0 => Self::within_day(seconds, minutes, hours),
            1 => Self::new(UNIT_YESTERDAY, 0),
            2..=6 => Self::new(UNIT_DAYS_AGO, days),
            7..=29 => Self::new(UNIT_WEEKS_AGO, days / 7),
            _ if days / 30 < 12 => Self::new(UNIT_MONTHS_AGO, days / 30),
            _ => Self::new(UNIT_LONG_AGO, 0),
        }
    }

    const fn within_day(seconds: i64, minutes: i64, hours: i64) -> Self {
        if seconds < 10 * 60 {
            Self::new(UNIT_JUST_NOW, 0)
        } else if minutes < 25 {
            Self::new(UNIT_MINUTES, 0)
        } else if minutes < 35 {
            Self::new(UNIT_HALF_HOUR, 0)
        } else if minutes < 60 {
            Self::new(UNIT_MINUTES_AGO, minutes)
        } else if hours < 10 {
            Self::new(UNIT_HOURS_AGO, hours)
        } else {
            Self::new(UNIT_TODAY, 0)
        }
    }
}

impl From<AgeBucket> for Value {
    fn from(bucket: AgeBucket) -> Self {
        Document::new()
            .with("unit", bucket.unit)
            .with("amount", bucket.amount)
            .into()
    }
}

//
// Job
//

/// `{min, max}`, or null when either bound is unset (zero).
pub fn salary(ctx: &AttrContext<'_>) -> Result<Value, ComputeError> {
    let min = ctx.int("min_salary")?;
    let max = ctx.int("max_salary")?;

    if min == 0 || max == 0 {
        return Ok(Value::Null);
    }

    Ok(Document::new().with("min", min).with("max", max).into())
}

pub fn timedelta(ctx: &AttrContext<'_>) -> Result<Value, ComputeError> {
    let created_on = ctx.timestamp("created_on")?;

    Ok(AgeBucket::of(OffsetDateTime::now_utc() - created_on).into())
}

/// The `requirements` JSON column as a list of strings.
pub fn requirements_list(ctx: &AttrContext<'_>) -> Result<Value, ComputeError> {
    let requirements = match ctx.value("requirements") {
        Value::Null => return Ok(Value::List(Vec::new())),
        Value::List(items) => items,
        other => {
            return Err(ComputeError::new(format!(
                "requirements must be a list, found {}",
                other.type_name()
            )));
        }
    };

    requirements
        .iter()
        .map(|item| match item {
            Value::Text(_) => Ok(item.clone()),
            other => Err(ComputeError::new(format!(
                "requirement must be text, found {}",
                other.type_name()
            ))),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

//
// JobCategory
//

pub fn avg_min_salary(ctx: &AttrContext<'_>) -> Result<Value, ComputeError> {
    average_of_jobs(ctx, "min_salary")
}

pub fn avg_max_salary(ctx: &AttrContext<'_>) -> Result<Value, ComputeError> {
    average_of_jobs(ctx, "max_salary")
}

// Mean of one salary column over the category's jobs; null without jobs.
#[expect(clippy::cast_precision_loss)]
fn average_of_jobs(ctx: &AttrContext<'_>, column: &str) -> Result<Value, ComputeError> {
    let jobs = ctx.referencing("Job", "category");
    if jobs.is_empty() {
        return Ok(Value::Null);
    }

    let mut total = 0_i64;
    for job in &jobs {
        let salary = job
            .value(column)
            .and_then(Value::as_int)
            .ok_or_else(|| ComputeError::new(format!("job {} has no {column}", job.key())))?;
        total = total
            .checked_add(salary)
            .ok_or_else(|| ComputeError::new(format!("{column} total overflows")))?;
    }

    Ok(Value::Float(total as f64 / jobs.len() as f64))
}

//
// Guide
//

/// Always false on the row itself; guide search overrides it per call.
pub fn based_on_personality(_: &AttrContext<'_>) -> Result<Value, ComputeError> {
    Ok(Value::Bool(false))
}

///
/// TESTS
///
