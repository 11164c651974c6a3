use crate::domain::models::message::{Message, MessageRole, NewMessage};
use crate::domain::models::user::User;
use crate::domain::ports::{
    read_collection, write_collection, AssistantReply, AssistantRequest, AssistantService,
    ChatContext, KeyValueStore,
};
use crate::domain::services::command::{authorize_command, parse_command};
use crate::domain::services::dispatch::ActionDispatcher;
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, info_span, Instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReconcileMode {
    Command,
    Question,
}

/// Owns the per-user transcript. The synchronous part of `add_message`
/// appends the user's message (and a placeholder when remote work is
/// pending) before it returns; the remote round trip runs in a spawned task
/// that later swaps the placeholder for the reply. Observers learn about
/// that late edit through the broadcast channel.
pub struct ChatService {
    store: Arc<dyn KeyValueStore>,
    assistant: Arc<dyn AssistantService>,
    dispatcher: ActionDispatcher,
    transcript_changed: broadcast::Sender<String>,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        assistant: Arc<dyn AssistantService>,
        dispatcher: ActionDispatcher,
    ) -> Self {
        let (transcript_changed, _) = broadcast::channel(16);
        Self {
            store,
            assistant,
            dispatcher,
            transcript_changed,
        }
    }

    /// Fires with the actor's id after every asynchronous transcript edit.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.transcript_changed.subscribe()
    }

    fn storage_key(user_id: &str) -> String {
        format!("aiChatMessages_{}", user_id)
    }

    pub fn get_messages(&self, user_id: &str) -> Vec<Message> {
        read_collection(self.store.as_ref(), &Self::storage_key(user_id))
    }

    pub fn clear_messages(&self, actor: Option<&User>) -> Result<(), AppError> {
        let user = actor.ok_or(AppError::Unauthenticated)?;
        self.store.remove(&Self::storage_key(&user.id));
        Ok(())
    }

    pub fn add_message(
        &self,
        message: NewMessage,
        actor: Option<&User>,
        context: &ChatContext,
    ) -> Result<Message, AppError> {
        let user = actor.ok_or(AppError::Unauthenticated)?;
        if message.text.trim().is_empty() {
            return Err(AppError::Validation("message text is required".to_string()));
        }

        let key = Self::storage_key(&user.id);
        let mut messages = self.get_messages(&user.id);

        let user_message = Message::new(message.role, message.text.clone());
        messages.push(user_message.clone());
        write_collection(self.store.as_ref(), &key, &messages);

        if let Some(command) = parse_command(&message.text) {
            if !authorize_command(user, &command) {
                info!(
                    "Denied chat command {}-{} for user {}",
                    command.action.as_str(),
                    command.kind.as_str(),
                    user.id
                );
                let denial = Message::new(
                    MessageRole::Model,
                    format!(
                        "Sorry, you don't have permission to {} {}s.",
                        command.action.as_str(),
                        command.kind.as_str()
                    ),
                );
                messages.push(denial);
                write_collection(self.store.as_ref(), &key, &messages);
                return Ok(user_message);
            }

            let placeholder = Message::new(MessageRole::Model, "Processing command...");
            messages.push(placeholder.clone());
            write_collection(self.store.as_ref(), &key, &messages);

            let request = AssistantRequest {
                question: message.text,
                context: context.clone(),
                action: Some(command.action.as_str().to_string()),
                kind: Some(command.kind.as_str().to_string()),
            };
            self.spawn_reconciliation(user.clone(), placeholder, request, ReconcileMode::Command);
        } else {
            let placeholder = Message::new(MessageRole::Model, "Thinking...");
            messages.push(placeholder.clone());
            write_collection(self.store.as_ref(), &key, &messages);

            let request = AssistantRequest {
                question: message.text,
                context: context.clone(),
                action: None,
                kind: None,
            };
            self.spawn_reconciliation(user.clone(), placeholder, request, ReconcileMode::Question);
        }

        Ok(user_message)
    }

    // Fire-and-forget: `add_message` has already returned by the time the
    // reply lands, so failures become transcript entries instead of errors.
    fn spawn_reconciliation(
        &self,
        user: User,
        placeholder: Message,
        request: AssistantRequest,
        mode: ReconcileMode,
    ) {
        let store = self.store.clone();
        let assistant = self.assistant.clone();
        let dispatcher = self.dispatcher.clone();
        let notify = self.transcript_changed.clone();

        let span = info_span!(
            "chat_reconciliation",
            user_id = %user.id,
            placeholder_id = %placeholder.id
        );

        tokio::spawn(
            async move {
                let key = Self::storage_key(&user.id);
                match assistant.ask(request).await {
                    Ok(reply) => {
                        let mut messages: Vec<Message> = read_collection(store.as_ref(), &key);
                        match messages.iter().position(|m| m.id == placeholder.id) {
                            Some(index) => {
                                messages[index].text = reply.answer.clone();
                                messages[index].timestamp = Utc::now();
                            }
                            // The transcript was cleared while the call was
                            // in flight; append rather than drop the answer.
                            None if mode == ReconcileMode::Question => {
                                messages.push(Message::new(MessageRole::Model, reply.answer.clone()));
                            }
                            None => {}
                        }

                        match mode {
                            ReconcileMode::Command => {
                                dispatch_reply_action(&dispatcher, &reply, &user);
                                write_collection(store.as_ref(), &key, &messages);
                                let _ = notify.send(user.id.clone());
                            }
                            ReconcileMode::Question => {
                                write_collection(store.as_ref(), &key, &messages);
                                let _ = notify.send(user.id.clone());
                                dispatch_reply_action(&dispatcher, &reply, &user);
                            }
                        }
                    }
                    Err(err) => {
                        let text = match mode {
                            ReconcileMode::Command => format!(
                                "Sorry, I encountered an error processing your command: {}",
                                err
                            ),
                            ReconcileMode::Question => {
                                format!("Sorry, I encountered an error: {}", err)
                            }
                        };
                        let mut messages: Vec<Message> = read_collection(store.as_ref(), &key);
                        match messages.iter().position(|m| m.id == placeholder.id) {
                            Some(index) => {
                                messages[index].text = text;
                                messages[index].timestamp = Utc::now();
                            }
                            None if mode == ReconcileMode::Question => {
                                messages.push(Message::new(MessageRole::Model, text));
                            }
                            None => {}
                        }
                        write_collection(store.as_ref(), &key, &messages);
                        let _ = notify.send(user.id.clone());
                    }
                }
            }
            .instrument(span),
        );
    }
}

fn dispatch_reply_action(dispatcher: &ActionDispatcher, reply: &AssistantReply, user: &User) {
    if let (Some(kind), Some(action), Some(data)) = (&reply.kind, &reply.action, &reply.data) {
        dispatcher.perform(kind, action, data.clone(), user);
    }
}
