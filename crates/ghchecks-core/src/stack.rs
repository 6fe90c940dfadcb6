use crate::arn::secret_arn;
use crate::config::AppConfig;
use crate::env::DeployEnv;
use crate::error::Result;
use crate::schedule::Schedule;
use crate::secrets::SecretNames;
use crate::template::{Resource, Template};
use serde_json::json;

pub const STACK_DESCRIPTION: &str = "Lambda to check Github Release and PRs status";

const FUNCTION_ID: &str = "GithubLambda";
const ROLE_ID: &str = "GithubLambdaRole";
const POLICY_ID: &str = "GithubLambdaSecretsPolicy";
const RULE_ID: &str = "RunLambda";
const PERMISSION_ID: &str = "RunLambdaPermission";

// ---------------------------------------------------------------------------
// FunctionSpec
// ---------------------------------------------------------------------------

/// The compute-function descriptor: where the code lives and how to run it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: String,
    /// Directory packaged and uploaded by the deploy step.
    pub code_dir: String,
    pub index: String,
    pub handler: String,
    pub runtime: String,
    pub timeout_secs: u32,
}

impl Default for FunctionSpec {
    fn default() -> Self {
        Self {
            name: "github_cicd_checks_lambda".to_string(),
            code_dir: "lambda".to_string(),
            index: "index.py".to_string(),
            handler: "handler".to_string(),
            runtime: "python3.12".to_string(),
            timeout_secs: 30,
        }
    }
}

impl FunctionSpec {
    /// `index.py` + `handler` → the `index.handler` form CloudFormation wants.
    fn cf_handler(&self) -> String {
        let stem = self.index.strip_suffix(".py").unwrap_or(&self.index);
        format!("{stem}.{}", self.handler)
    }
}

// ---------------------------------------------------------------------------
// LambdaStack
// ---------------------------------------------------------------------------

/// Assembles the deployable unit: one function, one secret-read grant, one
/// scheduled trigger. Construction fails fast if either secret name is
/// empty; synthesis itself is pure and deterministic.
#[derive(Debug, Clone)]
pub struct LambdaStack {
    env: DeployEnv,
    function: FunctionSpec,
    schedule: Schedule,
    secrets: SecretNames,
}

impl LambdaStack {
    pub fn new(env: DeployEnv, config: &AppConfig) -> Result<Self> {
        let secrets = config.secret_names();
        secrets.validate()?;
        Ok(Self {
            env,
            function: FunctionSpec::default(),
            schedule: Schedule::working_hours(),
            secrets,
        })
    }

    pub fn with_function(mut self, function: FunctionSpec) -> Self {
        self.function = function;
        self
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn synth(&self) -> Result<Template> {
        let mut template = Template::new(STACK_DESCRIPTION);

        // The deploy step packages the code dir, uploads it, and passes the
        // location in as parameters.
        template.parameter(
            "CodeBucket",
            json!({
                "Type": "String",
                "Description": "S3 bucket holding the packaged lambda code"
            }),
        );
        template.parameter(
            "CodeKey",
            json!({
                "Type": "String",
                "Description": "S3 key of the packaged lambda code"
            }),
        );

        template.resource(
            ROLE_ID,
            Resource::new(
                "AWS::IAM::Role",
                json!({
                    "AssumeRolePolicyDocument": {
                        "Version": "2012-10-17",
                        "Statement": [{
                            "Effect": "Allow",
                            "Principal": { "Service": "lambda.amazonaws.com" },
                            "Action": "sts:AssumeRole"
                        }]
                    },
                    "ManagedPolicyArns": [
                        "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole"
                    ]
                }),
            ),
        );

        // Read access to exactly the two token secrets, scoped to this
        // account and region.
        template.resource(
            POLICY_ID,
            Resource::new(
                "AWS::IAM::Policy",
                json!({
                    "PolicyName": "github-lambda-secrets",
                    "Roles": [{ "Ref": ROLE_ID }],
                    "PolicyDocument": {
                        "Version": "2012-10-17",
                        "Statement": [{
                            "Effect": "Allow",
                            "Action": "secretsmanager:GetSecretValue",
                            "Resource": [
                                secret_arn(&self.env.region, &self.env.account, &self.secrets.github_token),
                                secret_arn(&self.env.region, &self.env.account, &self.secrets.slack_token)
                            ]
                        }]
                    }
                }),
            ),
        );

        template.resource(
            FUNCTION_ID,
            Resource::new(
                "AWS::Lambda::Function",
                json!({
                    "FunctionName": self.function.name,
                    "Handler": self.function.cf_handler(),
                    "Runtime": self.function.runtime,
                    "Timeout": self.function.timeout_secs,
                    "Role": { "Fn::GetAtt": [ROLE_ID, "Arn"] },
                    "Code": {
                        "S3Bucket": { "Ref": "CodeBucket" },
                        "S3Key": { "Ref": "CodeKey" }
                    }
                }),
            )
            .depends_on(POLICY_ID)
            .with_metadata(json!({
                "aws:asset:path": self.function.code_dir,
                "aws:asset:property": "Code"
            })),
        );

        template.resource(
            RULE_ID,
            Resource::new(
                "AWS::Events::Rule",
                json!({
                    "ScheduleExpression": self.schedule.expression(),
                    "State": "ENABLED",
                    "Targets": [{
                        "Arn": { "Fn::GetAtt": [FUNCTION_ID, "Arn"] },
                        "Id": "Target0"
                    }]
                }),
            ),
        );

        template.resource(
            PERMISSION_ID,
            Resource::new(
                "AWS::Lambda::Permission",
                json!({
                    "Action": "lambda:InvokeFunction",
                    "FunctionName": { "Fn::GetAtt": [FUNCTION_ID, "Arn"] },
                    "Principal": "events.amazonaws.com",
                    "SourceArn": { "Fn::GetAtt": [RULE_ID, "Arn"] }
                }),
            ),
        );

        Ok(template)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StackError;

    fn test_env() -> DeployEnv {
        DeployEnv {
            account: "123456789012".to_string(),
            region: "us-east-1".to_string(),
        }
    }

    fn test_config() -> AppConfig {
        serde_yaml::from_str(
            "github_organization: my-org\nsecrets:\n  github_token: gh-secret\n  slack_token: slack-secret\n",
        )
        .unwrap()
    }

    #[test]
    fn synth_declares_all_five_resources() {
        let stack = LambdaStack::new(test_env(), &test_config()).unwrap();
        let template = stack.synth().unwrap();
        for id in [FUNCTION_ID, ROLE_ID, POLICY_ID, RULE_ID, PERMISSION_ID] {
            assert!(template.resources.contains_key(id), "missing {id}");
        }
        assert_eq!(template.resources.len(), 5);
    }

    #[test]
    fn grant_covers_both_secret_scopes() {
        let stack = LambdaStack::new(test_env(), &test_config()).unwrap();
        let template = stack.synth().unwrap();
        let policy = &template.resources[POLICY_ID].properties;
        let resources = &policy["PolicyDocument"]["Statement"][0]["Resource"];
        assert_eq!(
            resources[0],
            "arn:aws:secretsmanager:us-east-1:123456789012:secret:gh-secret-*"
        );
        assert_eq!(
            resources[1],
            "arn:aws:secretsmanager:us-east-1:123456789012:secret:slack-secret-*"
        );
    }

    #[test]
    fn function_descriptor_defaults() {
        let stack = LambdaStack::new(test_env(), &test_config()).unwrap();
        let template = stack.synth().unwrap();
        let props = &template.resources[FUNCTION_ID].properties;
        assert_eq!(props["FunctionName"], "github_cicd_checks_lambda");
        assert_eq!(props["Handler"], "index.handler");
        assert_eq!(props["Timeout"], 30);
    }

    #[test]
    fn rule_carries_the_cron_expression() {
        let stack = LambdaStack::new(test_env(), &test_config()).unwrap();
        let template = stack.synth().unwrap();
        let props = &template.resources[RULE_ID].properties;
        assert_eq!(props["ScheduleExpression"], "cron(0 12-22/4 ? * MON-FRI *)");
    }

    #[test]
    fn synth_is_deterministic() {
        let stack = LambdaStack::new(test_env(), &test_config()).unwrap();
        let first = stack.synth().unwrap().to_json().unwrap();
        let second = stack.synth().unwrap().to_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_secret_name_fails_construction() {
        let mut config = test_config();
        config.secrets.github_token.clear();
        let err = LambdaStack::new(test_env(), &config).unwrap_err();
        assert!(matches!(err, StackError::EmptySecretName("github_token")));
    }

    #[test]
    fn custom_function_spec_overrides_defaults() {
        let stack = LambdaStack::new(test_env(), &test_config())
            .unwrap()
            .with_function(FunctionSpec {
                name: "other_lambda".to_string(),
                runtime: "python3.13".to_string(),
                ..FunctionSpec::default()
            });
        let template = stack.synth().unwrap();
        let props = &template.resources[FUNCTION_ID].properties;
        assert_eq!(props["FunctionName"], "other_lambda");
        assert_eq!(props["Runtime"], "python3.13");
    }
}
