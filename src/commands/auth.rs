//! Login, registration and session commands

use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use std::future::Future;
use std::io::{self, BufRead};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Interval;

use super::utils::{self, arg_or_prompt};
use super::Panel;
use vendor_panel::auth::{LoginWizard, Step};
use vendor_panel::models::vendor::NewVendor;
use vendor_panel::validate;

/// Options for the login command
pub struct LoginOptions {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Submit the OTP echoed by the server without asking
    pub autofill: bool,
}

/// Lines typed on stdin, read on a plain thread so the countdown keeps running
fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Interactive two-step login; returns the route to open next
pub async fn login(panel: &mut Panel, options: LoginOptions) -> Result<&'static str> {
    let mut wizard = LoginWizard::new();

    let email = arg_or_prompt(options.email, "Email")?;
    let password = arg_or_prompt(options.password, "Password")?;
    wizard.submit_login(&panel.api, &email, &password).await?;

    println!(
        "OTP sent. Enter the 4-digit code, or `r` to resend once the timer ends."
    );
    if let Some(code) = wizard.autofill() {
        println!("{} {}", "Autofill:".dimmed(), code);
    }

    let mut lines = stdin_lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;

    if options.autofill {
        if let Some(code) = wizard.autofill().map(str::to_string) {
            wizard.set_code(&code);
            if let Err(e) = wizard.submit_otp(&panel.api, &mut panel.session).await {
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
    }

    while matches!(wizard.step(), Step::VerifyOtp { .. }) {
        tokio::select! {
            _ = ticker.tick() => {
                let was_locked = !wizard.can_resend();
                wizard.tick();
                if was_locked && wizard.can_resend() {
                    println!("{}", "You can now request a new OTP (type `r`).".yellow());
                }
            }
            line = lines.recv() => {
                let Some(line) = line else { bail!("Login cancelled") };
                let input = line.trim();
                if input.eq_ignore_ascii_case("r") || input.eq_ignore_ascii_case("resend") {
                    match wizard.resend(&panel.api).await {
                        Ok(()) => {
                            println!("A new OTP has been sent.");
                            if let Some(code) = wizard.autofill() {
                                println!("{} {}", "Autofill:".dimmed(), code);
                            }
                        }
                        Err(e) => {
                            if let Step::VerifyOtp { resend, .. } = wizard.step() {
                                eprintln!("{} {} (resend in {})", "Error:".red(), e, resend);
                            }
                        }
                    }
                    continue;
                }
                wizard.set_code(input);
                if let Err(e) = wizard.submit_otp(&panel.api, &mut panel.session).await {
                    eprintln!("{} {}", "Error:".red(), e);
                }
            }
            _ = tokio::signal::ctrl_c() => bail!("Login cancelled"),
        }
    }

    panel.refresh_client();
    utils::success(&format!("Welcome, {}!", panel.restaurant_name()));
    println!("Redirecting to the dashboard in 60s. Press Enter to continue now.");

    let interrupt = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    Ok(await_redirect(&mut wizard, &mut ticker, &mut lines, interrupt).await)
}

/// Hold the success popup until the countdown ends, Enter is pressed or `interrupt` fires
async fn await_redirect<F>(
    wizard: &mut LoginWizard,
    ticker: &mut Interval,
    lines: &mut mpsc::UnboundedReceiver<String>,
    interrupt: F,
) -> &'static str
where
    F: Future<Output = ()>,
{
    tokio::pin!(interrupt);
    while wizard.redirect().is_none() {
        tokio::select! {
            _ = ticker.tick() => wizard.tick(),
            _ = lines.recv() => wizard.acknowledge(),
            _ = &mut interrupt => wizard.acknowledge(),
        }
    }
    wizard.redirect().unwrap_or("/dashboard")
}

/// Options for the register command
pub struct RegisterOptions {
    pub restaurant_name: String,
    pub email: String,
    pub mobile: String,
    pub password: Option<String>,
    pub location: Option<String>,
}

pub async fn register(panel: &Panel, options: RegisterOptions) -> Result<()> {
    let password = arg_or_prompt(options.password, "Password")?;
    let vendor = NewVendor {
        restaurant_name: options.restaurant_name.trim().to_string(),
        email: options.email.trim().to_string(),
        mobile: options.mobile.trim().to_string(),
        password,
        location: options.location,
    };

    validate::required("Restaurant name", &vendor.restaurant_name)?;
    validate::email(&vendor.email)?;
    validate::mobile(&vendor.mobile)?;
    validate::password(&vendor.password)?;

    let message = panel.api.register(&vendor).await?;
    utils::success(&message);
    println!("Run `vendor-panel login` to sign in.");
    Ok(())
}

pub fn logout(panel: &mut Panel) -> Result<()> {
    if panel.session.current().is_none() {
        println!("Not logged in.");
        return Ok(());
    }
    panel.session.sign_out()?;
    panel.refresh_client();
    utils::success("Logged out.");
    Ok(())
}

/// Show the cached profile; `refresh` re-fetches it first
pub async fn whoami(panel: &mut Panel, refresh: bool) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    if refresh {
        let vendor = panel.api.vendor(&vendor_id).await?;
        panel.session.update_profile(vendor)?;
    }

    let session = panel.session.require()?;
    let mut lines = vec![format!("Vendor ID: {}", session.vendor_id)];
    match &session.vendor {
        Some(v) => {
            lines.push(format!("Restaurant: {}", v.restaurant_name));
            lines.push(format!("Email: {}", v.email));
            lines.push(format!("Mobile: {}", v.mobile));
            lines.push(format!("Location: {}", utils::or_dash(v.location.as_deref())));
            lines.push(format!("Status: {}", v.status));
            lines.push(format!(
                "Plan: {}",
                match (v.is_plan_purchased, v.plan_expiry) {
                    (true, Some(expiry)) => format!("purchased, expires {}", expiry.format("%Y-%m-%d")),
                    (true, None) => "purchased".to_string(),
                    (false, _) => "none".to_string(),
                }
            ));
        }
        None => lines.push("(profile not cached, use --refresh)".to_string()),
    }
    Ok(lines.join("\n"))
}
