use policyguard_engine::{CompiledPolicy, Evaluation, PolicyEvaluator};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Evaluator whose policy `code` is a tiny script:
///
/// - `compliant`
/// - `violating` (no details) or `violating:<json>`
/// - `echo-params`: violating, with the effective parameters as the recommended value
/// - `eval-error`
/// - `panic`
///
/// Anything else fails to parse.
#[derive(Debug, Default)]
pub struct ScriptedEvaluator {
    gauge: Arc<Gauge>,
    delay: Duration,
}

#[derive(Debug, Default)]
struct Gauge {
    active: AtomicUsize,
    peak: AtomicUsize,
    evaluated: AtomicUsize,
}

impl ScriptedEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold each evaluation for `delay`, so overlapping calls are observable.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Highest number of evaluations seen running at once.
    pub fn peak(&self) -> usize {
        self.gauge.peak.load(Ordering::SeqCst)
    }

    pub fn evaluated(&self) -> usize {
        self.gauge.evaluated.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
enum Script {
    Compliant,
    Violating(Option<Value>),
    EchoParams,
    EvalError,
    Panic,
}

struct ScriptedPolicy {
    script: Script,
    gauge: Arc<Gauge>,
    delay: Duration,
}

impl PolicyEvaluator for ScriptedEvaluator {
    fn parse(&self, code: &str, _query: &str) -> anyhow::Result<Box<dyn CompiledPolicy>> {
        let script = match code {
            "compliant" => Script::Compliant,
            "violating" => Script::Violating(None),
            "echo-params" => Script::EchoParams,
            "eval-error" => Script::EvalError,
            "panic" => Script::Panic,
            other => match other.strip_prefix("violating:") {
                Some(details) => Script::Violating(Some(serde_json::from_str(details)?)),
                None => anyhow::bail!("unexpected token in rule: {other}"),
            },
        };
        Ok(Box::new(ScriptedPolicy {
            script,
            gauge: Arc::clone(&self.gauge),
            delay: self.delay,
        }))
    }
}

impl CompiledPolicy for ScriptedPolicy {
    fn eval_compliant(
        &self,
        _manifest: &Value,
        parameters: &Map<String, Value>,
        _query: &str,
    ) -> anyhow::Result<Evaluation> {
        let running = self.gauge.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.gauge.peak.fetch_max(running, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.gauge.active.fetch_sub(1, Ordering::SeqCst);
        self.gauge.evaluated.fetch_add(1, Ordering::SeqCst);

        match &self.script {
            Script::Compliant => Ok(Evaluation::Compliant),
            Script::Violating(details) => Ok(Evaluation::Violating {
                details: details.clone(),
            }),
            Script::EchoParams => Ok(Evaluation::Violating {
                details: Some(json!({
                    "msg": "parameters",
                    "recommended_value": Value::Object(parameters.clone()),
                })),
            }),
            Script::EvalError => anyhow::bail!("rego_type_error: undefined function"),
            Script::Panic => panic!("evaluator crashed"),
        }
    }
}
